//! Pointer and touch input
//!
//! Events arrive in client (viewport) coordinates; the paddle wants an x
//! relative to the canvas's left edge.

use crate::consts::CANVAS_WIDTH;

/// Client x converted to canvas-local x. No scaling is applied; the canvas
/// is expected to be shown at its logical size.
#[inline]
pub fn canvas_local_x(client_x: f32, canvas_left: f32) -> f32 {
    client_x - canvas_left
}

/// Canvas-local x if it lies on the canvas, else `None`
pub fn paddle_target(client_x: f32, canvas_left: f32) -> Option<f32> {
    let x = canvas_local_x(client_x, canvas_left);
    (x.is_finite() && (0.0..=CANVAS_WIDTH).contains(&x)).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_target() {
        assert_eq!(paddle_target(150.0, 100.0), Some(50.0));
        assert_eq!(paddle_target(100.0, 100.0), Some(0.0));
        assert_eq!(paddle_target(900.0, 100.0), Some(800.0));
        assert_eq!(paddle_target(99.0, 100.0), None);
        assert_eq!(paddle_target(901.0, 100.0), None);
        assert_eq!(paddle_target(f32::NAN, 0.0), None);
    }
}
