//! Headless platform
//!
//! Records everything the session asks of it. Backs the native demo binary
//! and the test suite.

use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::{Sprite, Surface};
use crate::session::{Session, Snapshot};

use super::{FrameId, Platform};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: String,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        color: String,
    },
    Image {
        sprite: Sprite,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// Surface that keeps the calls of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Number of clears seen, i.e. frames drawn
    pub frames_drawn: u64,
}

impl RecordingSurface {
    /// Text of every `Text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        // A clear starts a new frame
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
        self.frames_drawn += 1;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            w,
            h,
            color: color.to_owned(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font: &str, color: &str) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
            color: color.to_owned(),
        });
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Image { sprite, x, y, w, h });
    }
}

/// Audio sink that only counts
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub effects: Vec<SoundEffect>,
    pub music_playing: bool,
    pub music_starts: u32,
    pub music_stops: u32,
}

impl AudioSink for RecordingAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }

    fn play_music(&mut self) {
        self.music_playing = true;
        self.music_starts += 1;
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
        self.music_stops += 1;
    }
}

/// Platform with a fake frame queue
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    pub surface: RecordingSurface,
    pub audio: RecordingAudio,
    /// Frames requested and neither run nor cancelled
    pub pending: Vec<FrameId>,
    pub input_attached: bool,
    /// attach_input calls over the platform's lifetime
    pub input_attachments: u32,
    /// When set, `request_frame` fails
    pub refuse_frames: bool,
    next_frame: FrameId,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending frame, as the browser would before invoking it
    pub fn take_frame(&mut self) -> Option<FrameId> {
        (!self.pending.is_empty()).then(|| self.pending.remove(0))
    }
}

impl Platform for HeadlessPlatform {
    type Surface = RecordingSurface;
    type Audio = RecordingAudio;

    fn surface(&mut self) -> &mut RecordingSurface {
        &mut self.surface
    }

    fn audio(&mut self) -> &mut RecordingAudio {
        &mut self.audio
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        if self.refuse_frames {
            return None;
        }
        self.next_frame += 1;
        self.pending.push(self.next_frame);
        Some(self.next_frame)
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.pending.retain(|&f| f != frame);
    }

    fn attach_input(&mut self) {
        self.input_attached = true;
        self.input_attachments += 1;
    }

    fn detach_input(&mut self) {
        self.input_attached = false;
    }
}

/// Drive a session with the paddle glued under the ball until the game ends
/// or `max_frames` have run. Returns the final snapshot.
pub fn autoplay(
    session: &mut Session,
    platform: &mut HeadlessPlatform,
    max_frames: u64,
) -> Snapshot {
    let mut frames = 0;
    while frames < max_frames {
        let Some(frame) = platform.take_frame() else {
            break;
        };
        let ball_x = session.state().ball.pos.x;
        session.pointer_moved(ball_x, 0.0);
        session.on_frame(platform, frame);
        frames += 1;
    }
    log::info!("Autoplay ran {} frames: {:?}", frames, session.snapshot());
    session.snapshot()
}
