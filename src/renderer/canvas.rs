//! 2D canvas renderer (browser only)
//!
//! Draws sprites from the player and enemy sheets once they have loaded and
//! falls back to solid rectangles until then.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{EnemySprite, PlayerPose, RenderSink};
use crate::consts::{ENEMY_SPRITE_SIZE, PLAYER_SPRITE_SIZE};
use crate::sim::Entity;

const PLAYER_FALLBACK: &str = "blue";
const ENEMY_FALLBACK: &str = "red";
const BULLET_COLOR: &str = "white";

/// Canvas-backed [`RenderSink`]
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    player_sheet: HtmlImageElement,
    enemy_sheet: HtmlImageElement,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Start loading both sprite sheets; drawing works immediately with the
    /// rectangle fallback
    pub fn new(
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        player_sheet_src: &str,
        enemy_sheet_src: &str,
    ) -> Result<Self, JsValue> {
        let player_sheet = HtmlImageElement::new()?;
        player_sheet.set_src(player_sheet_src);
        let enemy_sheet = HtmlImageElement::new()?;
        enemy_sheet.set_src(enemy_sheet_src);

        Ok(Self {
            ctx,
            player_sheet,
            enemy_sheet,
            width,
            height,
        })
    }

    /// Clear the canvas before a new frame
    pub fn begin_frame(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill(&self, body: &Entity, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            body.pos.x as f64,
            body.pos.y as f64,
            body.size.x as f64,
            body.size.y as f64,
        );
    }

    fn blit(&self, sheet: &HtmlImageElement, cell: f64, frame: u8, row: u8, body: &Entity) {
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                sheet,
                frame as f64 * cell,
                row as f64 * cell,
                cell,
                cell,
                body.pos.x as f64,
                body.pos.y as f64,
                body.size.x as f64,
                body.size.y as f64,
            );
        if let Err(e) = result {
            log::warn!("Sprite draw failed: {:?}", e);
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn player(&mut self, pose: &PlayerPose) {
        if self.player_sheet.complete() && self.player_sheet.natural_width() > 0 {
            self.blit(&self.player_sheet, PLAYER_SPRITE_SIZE, pose.frame, pose.row, &pose.body);
        } else {
            self.fill(&pose.body, PLAYER_FALLBACK);
        }
    }

    fn enemy(&mut self, sprite: &EnemySprite) {
        if self.enemy_sheet.complete() && self.enemy_sheet.natural_width() > 0 {
            self.ctx.save();
            self.ctx.set_global_alpha(sprite.opacity as f64);
            self.blit(&self.enemy_sheet, ENEMY_SPRITE_SIZE, sprite.frame, sprite.row, &sprite.body);
            self.ctx.restore();
        } else {
            self.fill(&sprite.body, ENEMY_FALLBACK);
        }
    }

    fn bullet(&mut self, bullet: &Entity) {
        self.fill(bullet, BULLET_COLOR);
    }
}
