//! Collision detection against the canvas bounds and the brick grid
//!
//! Everything is axis-aligned. Walls are tested against the ball's projected
//! next position; bricks against its current center point.

use glam::Vec2;

use super::state::{Ball, Brick};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// What the ball meets on the vertical axis next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// Still inside the playfield
    None,
    /// Top edge
    Ceiling,
    /// Bottom edge, where the paddle lives
    Floor,
}

/// Whether the next position leaves `[radius, width - radius]`
pub fn hits_side_wall(ball: &Ball) -> bool {
    let next_x = ball.next_pos().x;
    next_x > CANVAS_WIDTH - ball.radius || next_x < ball.radius
}

/// Ceiling wins over floor; both cannot happen on a 600px canvas
pub fn vertical_contact(ball: &Ball) -> VerticalContact {
    let next_y = ball.next_pos().y;
    if next_y < ball.radius {
        VerticalContact::Ceiling
    } else if next_y > CANVAS_HEIGHT - ball.radius {
        VerticalContact::Floor
    } else {
        VerticalContact::None
    }
}

/// Indices of every alive brick whose interior contains `center`.
///
/// Brute force over the whole grid; with 50 cells there is nothing to gain
/// from partitioning.
pub fn bricks_containing(center: Vec2, bricks: &[Brick]) -> Vec<usize> {
    bricks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.alive && b.contains(center))
        .map(|(i, _)| i)
        .collect()
}
