//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One step per animation frame, velocities in pixels per frame
//! - Stable iteration order (column-major brick grid)
//! - Side effects leave as `GameEvent`s

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{VerticalContact, bricks_containing, hits_side_wall, vertical_contact};
pub use state::{Ball, Brick, GameEvent, GamePhase, GameState, Paddle};
pub use tick::tick;
