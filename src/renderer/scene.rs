//! Scene composition: turns a `GameState` into draw calls

use super::{Sprite, Surface};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::GameState;

/// HUD text font
pub const HUD_FONT: &str = "20px pretendard";
pub const HUD_COLOR: &str = "white";
pub const PADDLE_COLOR: &str = "#FFC0CB";
pub const LIFE_COLOR: &str = "red";
/// One apple per remaining life
pub const LIFE_GLYPH: &str = "\u{1F34E}";

/// Hue rotates 50 degrees per row
pub fn brick_color(row: usize) -> String {
    format!("hsl({}, 70%, 50%)", row * 50)
}

/// Draw one full frame: bricks, ball, paddle, score, lives
pub fn draw_scene(surface: &mut impl Surface, state: &GameState) {
    surface.clear(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

    for brick in state.bricks.iter().filter(|b| b.alive) {
        surface.fill_rect(
            brick.x,
            brick.y,
            brick.width,
            brick.height,
            &brick_color(brick.row),
        );
    }

    let ball = &state.ball;
    surface.draw_image(
        Sprite::Ball,
        ball.pos.x - ball.radius,
        ball.pos.y - ball.radius,
        ball.radius * 2.0,
        ball.radius * 2.0,
    );

    let paddle = &state.paddle;
    surface.fill_rect(
        paddle.x,
        paddle.y(),
        paddle.width,
        paddle.height,
        PADDLE_COLOR,
    );

    surface.draw_text(
        &format!("Score: {}", state.score),
        10.0,
        30.0,
        HUD_FONT,
        HUD_COLOR,
    );

    surface.draw_text("Lives: ", 10.0, 60.0, HUD_FONT, HUD_COLOR);
    for i in 0..state.lives {
        surface.draw_text(
            LIFE_GLYPH,
            80.0 + f32::from(i) * 30.0,
            60.0,
            HUD_FONT,
            LIFE_COLOR,
        );
    }
}
