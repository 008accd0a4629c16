//! Session controller
//!
//! Owns the `GameState` for one game. Input and frame scheduling are
//! registered once in `start_game` and released once in `teardown`; in
//! between the state is updated in place.

use serde::Serialize;

use crate::audio::{AudioSink, SoundEffect};
use crate::platform::input::paddle_target;
use crate::platform::{FrameId, Platform};
use crate::renderer::draw_scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// What the presentation shell reads after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

/// The loop controller
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    state: GameState,
    /// Frame requested from the host and not yet run
    pending_frame: Option<FrameId>,
    /// Input attached and music started
    running: bool,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let state = GameState::new(settings.ball_speed);
        Self {
            settings,
            state,
            pending_frame: None,
            running: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score,
            lives: self.state.lives,
            phase: self.state.phase,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Leave the instructions screen and start the loop.
    ///
    /// Returns false if this session already started.
    pub fn start_game<P: Platform>(&mut self, platform: &mut P) -> bool {
        if !self.state.advance_phase(GamePhase::Playing) {
            return false;
        }
        platform.attach_input();
        platform.audio().play_music();
        self.running = true;
        self.schedule(platform);
        log::info!("Game started (ball speed {})", self.state.ball_speed);
        true
    }

    /// Throw the current game away and start a fresh one
    pub fn restart_game<P: Platform>(&mut self, platform: &mut P) {
        self.teardown(platform);
        self.state = GameState::new(self.settings.ball_speed);
        log::info!("Game restarted");
        self.start_game(platform);
    }

    /// Pointer or touch moved. Ignored unless the game is live.
    pub fn pointer_moved(&mut self, client_x: f32, canvas_left: f32) {
        if !self.running || self.state.phase != GamePhase::Playing {
            return;
        }
        if let Some(x) = paddle_target(client_x, canvas_left) {
            self.state.paddle.center_on(x);
        }
    }

    /// Frame callback: draw, step, dispatch events, then reschedule or stop.
    ///
    /// Only the frame this session is waiting for runs. A callback for a
    /// frame that was cancelled by teardown or restart returns without
    /// touching anything.
    pub fn on_frame<P: Platform>(&mut self, platform: &mut P, frame: FrameId) {
        if self.pending_frame != Some(frame) {
            log::debug!("Ignoring stale frame {}", frame);
            return;
        }
        self.pending_frame = None;
        if !self.running || self.state.phase != GamePhase::Playing {
            return;
        }

        draw_scene(platform.surface(), &self.state);
        tick(&mut self.state);

        for event in self.state.drain_events() {
            match event {
                GameEvent::BrickDestroyed { .. } => {
                    platform.audio().play_effect(SoundEffect::BrickHit);
                }
                GameEvent::Won => log::info!("All bricks cleared, score {}", self.state.score),
                GameEvent::Lost => log::info!("Game over, score {}", self.state.score),
                _ => {}
            }
        }

        if self.state.phase.is_terminal() {
            self.teardown(platform);
        } else {
            self.schedule(platform);
        }
    }

    /// Release input, cancel the pending frame, stop the music. Safe to call
    /// any number of times.
    pub fn teardown<P: Platform>(&mut self, platform: &mut P) {
        if let Some(frame) = self.pending_frame.take() {
            platform.cancel_frame(frame);
        }
        if self.running {
            self.running = false;
            platform.detach_input();
            platform.audio().stop_music();
            log::info!("Session torn down in phase {:?}", self.state.phase);
        }
    }

    fn schedule<P: Platform>(&mut self, platform: &mut P) {
        if self.pending_frame.is_some() {
            return;
        }
        self.pending_frame = platform.request_frame();
        if self.pending_frame.is_none() {
            log::warn!("Host refused a frame; loop stalled");
        }
    }
}
