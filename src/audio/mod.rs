//! Audio sink
//!
//! The loop only ever asks for two things: play an effect, and start or stop
//! the background track. Playback is fire-and-forget; a sink must swallow its
//! own failures (autoplay policies reject `play()` until the first gesture).

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A brick was destroyed
    BrickHit,
}

/// Where the session sends sound
pub trait AudioSink {
    /// Play a one-shot effect
    fn play_effect(&mut self, effect: SoundEffect);

    /// Start the background track from its current position, looping
    fn play_music(&mut self);

    /// Pause the background track and rewind it
    fn stop_music(&mut self);
}
