//! Apple Breakout - a canvas breakout game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, collisions, game state)
//! - `session`: Loop controller that owns the state between start and game end
//! - `renderer`: Draw-call surface and scene composition
//! - `audio`: Sound effect and music sink
//! - `platform`: Browser/headless host abstraction
//! - `settings`: Data-driven game settings

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canvas logical size
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle sits on the bottom edge of the canvas
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    /// Ball speed in pixels per frame, applied to both axes
    pub const BALL_START_SPEED: f32 = 3.0;
    /// Spawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 50.0;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const POINTS_PER_BRICK: u64 = 10;
}
