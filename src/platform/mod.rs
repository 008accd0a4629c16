//! Platform abstraction layer
//!
//! Handles browser/headless differences for:
//! - Frame scheduling
//! - Input listener registration
//! - The render surface and audio sink

pub mod headless;
pub mod input;

pub use headless::HeadlessPlatform;

use crate::audio::AudioSink;
use crate::renderer::Surface;

/// Handle for a scheduled frame (the `requestAnimationFrame` id on the web)
pub type FrameId = i32;

/// Everything the session needs from its host
pub trait Platform {
    type Surface: Surface;
    type Audio: AudioSink;

    fn surface(&mut self) -> &mut Self::Surface;

    fn audio(&mut self) -> &mut Self::Audio;

    /// Ask for one more frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Drop a frame that has not run yet
    fn cancel_frame(&mut self, frame: FrameId);

    /// Start delivering pointer/touch moves to the session
    fn attach_input(&mut self);

    /// Stop delivering pointer/touch moves
    fn detach_input(&mut self);
}
