//! Game state and core simulation types
//!
//! Everything the loop mutates between frames lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Coarse lifecycle of a session. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Instructions shown, waiting for the start button
    NotStarted,
    /// Active gameplay
    Playing,
    /// Every brick destroyed
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Won or Lost
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::NotStarted, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::Won)
                | (GamePhase::Playing, GamePhase::Lost)
        )
    }
}

/// Something that happened during a step, for audio and the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { column: usize, row: usize },
    WallBounce,
    CeilingBounce,
    PaddleBounce,
    LifeLost { remaining: u8 },
    Won,
    Lost,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the spawn point moving up and to the right
    pub fn spawn(speed: f32) -> Self {
        Self {
            pos: Self::spawn_point(),
            vel: Vec2::new(speed, -speed),
            radius: BALL_RADIUS,
        }
    }

    /// Bottom center of the canvas
    pub fn spawn_point() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - BALL_SPAWN_OFFSET)
    }

    /// Position after one more frame at the current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle. Only input moves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Top edge, fixed to the bottom of the canvas
    pub fn y(&self) -> f32 {
        CANVAS_HEIGHT - self.height
    }

    /// Center the paddle under a canvas-local x. No clamping: the paddle may
    /// hang off either edge.
    pub fn center_on(&mut self, x: f32) {
        self.x = x - self.width / 2.0;
    }

    /// Inclusive horizontal span test
    pub fn covers(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }
}

/// A single brick cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Brick {
    /// Brick at its grid cell
    pub fn at(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            x: column as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING,
            y: row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_PADDING,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            alive: true,
        }
    }

    /// Strict interior test, edges do not count
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Speed the ball is (re)spawned with
    pub ball_speed: f32,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u64,
    /// Frames stepped while playing
    pub frame: u64,
    /// Current phase
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Column-major brick grid, never compacted
    pub bricks: Vec<Brick>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session: full grid, ball at spawn, paddle centered
    pub fn new(ball_speed: f32) -> Self {
        let bricks = (0..BRICK_COLUMNS)
            .flat_map(|c| (0..BRICK_ROWS).map(move |r| Brick::at(c, r)))
            .collect();

        Self {
            ball_speed,
            lives: STARTING_LIVES,
            score: 0,
            frame: 0,
            phase: GamePhase::NotStarted,
            ball: Ball::spawn(ball_speed),
            paddle: Paddle::default(),
            bricks,
            events: Vec::new(),
        }
    }

    /// Move to `next` if the transition is legal
    pub fn advance_phase(&mut self, next: GamePhase) -> bool {
        if !self.phase.can_advance_to(next) {
            log::warn!("Ignoring phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        true
    }

    /// Put the ball back at spawn after a miss. The grid is left alone.
    pub fn reset_ball(&mut self) {
        self.ball = Ball::spawn(self.ball_speed);
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn bricks_destroyed(&self) -> usize {
        self.bricks.len() - self.bricks_remaining()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
