//! Player controller
//!
//! Owns the ship: horizontal movement, bullet spawning and advancement, and
//! the idle/firing animation state machine.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::state::{Bullet, Player};
use super::tick::{InputSnapshot, Simulatable, TickContext};
use crate::consts::FIRING_SEQUENCE;
use crate::renderer::{PlayerPose, RenderSink};
use crate::settings::{PlayerSettings, Settings};

/// Drives the single [`Player`] instance
#[derive(Debug, Clone)]
pub struct PlayerController {
    player: Player,
    /// Construction-time position, restored on reset
    start: Vec2,
    playfield_width: f32,
    tuning: PlayerSettings,
}

impl PlayerController {
    pub fn new(settings: &Settings) -> Self {
        let start = settings.player_start();
        Self {
            player: Player::new(start, settings.player.size),
            start,
            playfield_width: settings.playfield.width,
            tuning: settings.player,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Apply held move intents, keeping the ship fully inside the playfield
    fn steer(&mut self, input: &InputSnapshot) {
        let max_x = self.playfield_width - self.player.body.size.x;
        let x = &mut self.player.body.pos.x;
        if input.left {
            *x = (*x - self.tuning.speed).max(0.0);
        }
        if input.right {
            *x = (*x + self.tuning.speed).min(max_x);
        }
    }

    /// Spawn a bullet from the nose of the ship and kick off the firing
    /// animation unless it is already playing
    fn fire(&mut self, now: f64, bullets: &mut Vec<Bullet>) {
        let body = &self.player.body;
        let pos = Vec2::new(body.center_x() - self.tuning.bullet_size / 2.0, body.top());
        bullets.push(Bullet::new(pos, self.tuning.bullet_size, self.tuning.bullet_speed));

        if !self.player.firing {
            self.player.firing = true;
            self.player.firing_step = 0;
            self.player.frame = FIRING_SEQUENCE[0];
            self.player.next_frame_time = now + self.tuning.fire_frame_ms;
        }
    }

    /// One step of the firing sequence per elapsed deadline
    fn step_animation(&mut self, now: f64) {
        let p = &mut self.player;
        if !p.firing || now < p.next_frame_time {
            return;
        }

        p.firing_step += 1;
        if p.firing_step >= FIRING_SEQUENCE.len() {
            p.firing = false;
            p.frame = 0;
        } else {
            p.frame = FIRING_SEQUENCE[p.firing_step];
            p.next_frame_time = now + self.tuning.fire_frame_ms;
        }
    }
}

impl Simulatable for PlayerController {
    fn advance(&mut self, ctx: &mut TickContext<'_>) {
        self.steer(ctx.input);

        // Fire is edge-consumed: the host sets it, we clear it
        if ctx.input.fire {
            self.fire(ctx.now, ctx.bullets);
            ctx.input.fire = false;
        }

        for bullet in ctx.bullets.iter_mut() {
            bullet.advance();
        }
        ctx.bullets.retain(Bullet::in_play);

        self.step_animation(ctx.now);
        self.player.row = self.player.mode + u8::from(self.player.firing);
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        sink.player(&PlayerPose::from(&self.player));
    }

    fn reset(&mut self, _now: f64, _rng: &mut Pcg32) {
        self.player = Player::new(self.start, self.tuning.size);
    }
}
