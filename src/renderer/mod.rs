//! Rendering module
//!
//! The game only needs four primitives, so rendering goes through the small
//! `Surface` trait. The browser backs it with a 2d canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::draw_scene;

/// Ball sprite, relative to the page
pub const BALL_IMAGE_SRC: &str = "assets/ball.png";

/// Images the scene can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// The apple drawn in place of the ball
    Ball,
}

/// A 2D drawing target in canvas pixel space.
///
/// Draw calls are fire-and-forget; a backend that fails a call logs it and
/// carries on with the frame.
pub trait Surface {
    /// Clear a rectangle to transparent
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Fill a rectangle with a CSS color
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);

    /// Draw text with its baseline starting at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);

    /// Blit a sprite scaled into the given rectangle
    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_sprite_ships_as_png() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(BALL_IMAGE_SRC);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
