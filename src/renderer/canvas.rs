//! Canvas 2d backend for `Surface`

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Sprite, Surface};
use crate::error::StartupError;

/// Draws into a `<canvas>` through its 2d context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    ball_image: HtmlImageElement,
}

impl CanvasSurface {
    /// Grab the 2d context. The ball image must already be decoded.
    pub fn new(
        canvas: &HtmlCanvasElement,
        ball_image: HtmlImageElement,
    ) -> Result<Self, StartupError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(StartupError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| StartupError::NoContext2d)?;

        Ok(Self { ctx, ball_image })
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Ball => &self.ball_image,
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        let result = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            self.image(sprite),
            x as f64,
            y as f64,
            w as f64,
            h as f64,
        );
        if let Err(e) = result {
            log::warn!("drawImage({:?}) failed: {:?}", sprite, e);
        }
    }
}
