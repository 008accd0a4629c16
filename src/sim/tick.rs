//! Per-frame simulation step
//!
//! One call advances the game by exactly one animation frame: bricks, win
//! check, walls, paddle, then a single Euler step. There is no sub-stepping,
//! so a fast enough ball can tunnel through a brick.

use super::collision::{VerticalContact, bricks_containing, hits_side_wall, vertical_contact};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::POINTS_PER_BRICK;

/// Advance the game state by one frame.
///
/// Does nothing unless the phase is `Playing`. Rendering is not part of the
/// step; callers draw the pre-step state first. The frame that breaks the
/// last brick ends right after the win check: no wall, paddle or movement.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.frame += 1;

    // Every brick the center sits in counts, each flipping vy again
    for idx in bricks_containing(state.ball.pos, &state.bricks) {
        let brick = &mut state.bricks[idx];
        if !brick.destroy() {
            continue;
        }
        let (column, row) = (brick.column, brick.row);
        state.ball.vel.y = -state.ball.vel.y;
        state.score += POINTS_PER_BRICK;
        state.events.push(GameEvent::BrickDestroyed { column, row });
        log::debug!("Brick ({column}, {row}) destroyed, score {}", state.score);
    }

    if state.bricks_remaining() == 0 {
        state.advance_phase(GamePhase::Won);
        state.events.push(GameEvent::Won);
        return;
    }

    if hits_side_wall(&state.ball) {
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }

    match vertical_contact(&state.ball) {
        VerticalContact::None => {}
        VerticalContact::Ceiling => {
            state.ball.vel.y = -state.ball.vel.y;
            state.events.push(GameEvent::CeilingBounce);
        }
        VerticalContact::Floor => {
            if state.paddle.covers(state.ball.pos.x) {
                state.ball.vel.y = -state.ball.vel.y;
                state.events.push(GameEvent::PaddleBounce);
            } else {
                state.lives = state.lives.saturating_sub(1);
                if state.lives == 0 {
                    state.advance_phase(GamePhase::Lost);
                    state.events.push(GameEvent::Lost);
                    return;
                }
                log::info!("Ball lost, {} lives left", state.lives);
                state.events.push(GameEvent::LifeLost {
                    remaining: state.lives,
                });
                state.reset_ball();
            }
        }
    }

    state.ball.pos += state.ball.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing() -> GameState {
        let mut state = GameState::new(BALL_START_SPEED);
        state.advance_phase(GamePhase::Playing);
        state
    }

    #[test]
    fn test_not_started_is_noop() {
        let mut state = GameState::new(BALL_START_SPEED);
        let before = state.ball.pos;
        tick(&mut state);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_free_flight() {
        let mut state = playing();
        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(403.0, 547.0));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = playing();
        state.paddle.x = 350.0;
        state.ball.pos = Vec2::new(400.0, 583.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
        assert_eq!(state.lives, 3);
        assert_eq!(state.ball.pos, Vec2::new(403.0, 580.0));
        assert_eq!(state.drain_events(), vec![GameEvent::PaddleBounce]);
    }

    #[test]
    fn test_paddle_edge_counts() {
        let mut state = playing();
        state.paddle.x = 400.0;
        state.ball.pos = Vec2::new(400.0, 583.0);
        state.ball.vel = Vec2::new(3.0, 3.0);
        tick(&mut state);
        assert_eq!(state.lives, 3);
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_brick_hit() {
        let mut state = playing();
        state.ball.pos = Vec2::new(45.0, 25.0);

        tick(&mut state);

        assert!(!state.bricks[0].alive);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::BrickDestroyed { column: 0, row: 0 }]
        );
    }

    #[test]
    fn test_overlapping_bricks_both_count() {
        let mut state = playing();
        let (x, y) = (state.bricks[0].x, state.bricks[0].y);
        state.bricks[1].x = x;
        state.bricks[1].y = y;
        state.ball.pos = Vec2::new(45.0, 25.0);

        tick(&mut state);

        assert!(!state.bricks[0].alive);
        assert!(!state.bricks[1].alive);
        assert_eq!(state.score, 20);
        // Two flips cancel out
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_wall_bounce() {
        let mut state = playing();
        state.ball.pos = Vec2::new(783.0, 300.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(-3.0, 3.0));
        assert_eq!(state.ball.pos, Vec2::new(780.0, 303.0));
        assert_eq!(state.drain_events(), vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = playing();
        // Padding gap between the first two columns
        state.ball.pos = Vec2::new(85.0, 18.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
        assert_eq!(state.score, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::CeilingBounce]);
    }

    #[test]
    fn test_miss_resets_ball() {
        let mut state = playing();
        state.bricks[7].destroy();
        state.score = 10;
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(600.0, 583.0);
        state.ball.vel = Vec2::new(-3.0, 3.0);

        tick(&mut state);

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
        assert_eq!(state.ball.pos, Vec2::new(403.0, 547.0));
        // Grid is not rebuilt on a miss
        assert!(!state.bricks[7].alive);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LifeLost { remaining: 2 }]
        );
    }

    #[test]
    fn test_last_life_lost() {
        let mut state = playing();
        state.lives = 1;
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(600.0, 583.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.lives, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::Lost]);

        let frozen = state.ball.pos;
        tick(&mut state);
        assert_eq!(state.ball.pos, frozen);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_last_brick_wins_same_step() {
        let mut state = playing();
        for brick in state.bricks.iter_mut().skip(1) {
            brick.destroy();
        }
        state.score = 490;
        state.ball.pos = Vec2::new(45.0, 25.0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, 500);
        // The winning frame does not move the ball
        assert_eq!(state.ball.pos, Vec2::new(45.0, 25.0));
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::BrickDestroyed { column: 0, row: 0 },
                GameEvent::Won
            ]
        );

        let frame = state.frame;
        let pos = state.ball.pos;
        tick(&mut state);
        assert_eq!(state.frame, frame);
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_empty_grid_wins_without_hit() {
        let mut state = playing();
        for brick in state.bricks.iter_mut() {
            brick.destroy();
        }
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        for i in 0..2_000 {
            let x = (i as f32 * 7.0) % CANVAS_WIDTH;
            a.paddle.center_on(x);
            b.paddle.center_on(x);
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            speed in 1.0f32..12.0,
            paddle_xs in prop::collection::vec(0.0f32..=CANVAS_WIDTH, 1..64),
            frames in 1usize..1_500,
        ) {
            let mut state = GameState::new(speed);
            state.advance_phase(GamePhase::Playing);

            for i in 0..frames {
                let prev_lives = state.lives;
                let prev_phase = state.phase;
                let prev_alive: Vec<bool> = state.bricks.iter().map(|b| b.alive).collect();

                state.paddle.center_on(paddle_xs[i % paddle_xs.len()]);
                tick(&mut state);

                prop_assert!(state.lives <= prev_lives);
                prop_assert_eq!(
                    state.score,
                    POINTS_PER_BRICK * state.bricks_destroyed() as u64
                );
                for (brick, was_alive) in state.bricks.iter().zip(prev_alive) {
                    prop_assert!(was_alive || !brick.alive);
                }
                prop_assert!(
                    state.phase == prev_phase || prev_phase.can_advance_to(state.phase)
                );
                if state.phase == GamePhase::Lost {
                    prop_assert_eq!(state.lives, 0);
                }
                if state.phase == GamePhase::Won {
                    prop_assert_eq!(state.bricks_remaining(), 0);
                }
                state.drain_events();
            }
        }
    }
}
