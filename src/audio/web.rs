//! Audio backed by `<audio>` elements
//!
//! `play()` returns a promise that browsers reject until the page has seen a
//! user gesture. Rejections are awaited on the side and dropped.

use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use super::{AudioSink, SoundEffect};
use crate::Settings;

/// Effect played when a brick breaks
pub const BRICK_HIT_SRC: &str = "assets/poyo.mp3";
/// Background track
pub const MUSIC_SRC: &str = "assets/music.mp3";

/// Audio manager for the game
pub struct AudioManager {
    brick_hit: Option<HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let brick_hit = load(BRICK_HIT_SRC);
        let music = load(MUSIC_SRC);
        if let Some(music) = &music {
            music.set_loop(true);
            music.set_volume(f64::from(settings.effective_music_volume()));
        }
        Self {
            brick_hit,
            music,
            sfx_volume: settings.effective_sfx_volume(),
        }
    }

    fn effect_element(&self, effect: SoundEffect) -> Option<&HtmlAudioElement> {
        match effect {
            SoundEffect::BrickHit => self.brick_hit.as_ref(),
        }
    }
}

impl AudioSink for AudioManager {
    fn play_effect(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(el) = self.effect_element(effect) else {
            return;
        };
        // Restart so rapid hits are not swallowed while the clip is still playing
        el.set_volume(f64::from(self.sfx_volume));
        el.set_current_time(0.0);
        play(el, "effect");
    }

    fn play_music(&mut self) {
        if let Some(music) = &self.music {
            play(music, "music");
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
            music.set_current_time(0.0);
        }
    }
}

/// Create an element, logging (not failing) when the browser refuses
fn load(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(el) => Some(el),
        Err(e) => {
            log::warn!("Failed to create audio `{}` - sound disabled: {:?}", src, e);
            None
        }
    }
}

fn play(el: &HtmlAudioElement, what: &'static str) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("{} playback rejected: {:?}", what, e);
            }
        }),
        Err(e) => log::debug!("{} playback failed: {:?}", what, e),
    }
}
