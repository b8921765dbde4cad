//! Enemy swarm controller
//!
//! All live enemies share one horizontal direction and one speed. Each tick:
//! 1. Lockstep probe: if any enemy's next step would cross a side wall, the
//!    whole swarm reverses and drops instead of moving sideways
//! 2. Collisions: each enemy not already hit consumes at most one bullet
//! 3. Animation: spawn/idle/fade-out steps, removing fully faded enemies
//! 4. Wave clear: an empty swarm respawns faster with the bullets wiped

use rand_pcg::Pcg32;

use super::formation::Formation;
use super::state::{Bullet, Enemy};
use super::tick::{Simulatable, TickContext};
use crate::renderer::{EnemySprite, RenderSink};
use crate::settings::{EnemySettings, LayoutSettings, Settings};

/// Initial sweep direction (rightward)
pub const INITIAL_DIRECTION: f32 = 1.0;

/// Owns every enemy plus the swarm-wide motion and score
#[derive(Debug, Clone)]
pub struct Swarm {
    enemies: Vec<Enemy>,
    /// +1 sweeping right, -1 sweeping left
    direction: f32,
    /// Pixels per tick; only grows within a session
    speed: f32,
    score: u64,
    /// Waves cleared so far
    wave: u32,
    formation: Formation,
    layout: LayoutSettings,
    tuning: EnemySettings,
    playfield_width: f32,
}

impl Swarm {
    /// Build the swarm with its first wave already spawning
    pub fn new(settings: &Settings, now: f64, rng: &mut Pcg32) -> Self {
        let mut swarm = Self {
            enemies: Vec::new(),
            direction: INITIAL_DIRECTION,
            speed: settings.enemy.initial_speed,
            score: 0,
            wave: 0,
            formation: settings.formation.clone(),
            layout: settings.layout,
            tuning: settings.enemy,
            playfield_width: settings.playfield.width,
        };
        swarm.spawn_wave(now, rng);
        swarm
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[cfg(test)]
    pub(crate) fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Lowest enemy bottom edge, if any enemies are alive
    pub fn lowest_edge(&self) -> Option<f32> {
        self.enemies
            .iter()
            .map(|e| e.body.bottom())
            .max_by(|a, b| a.total_cmp(b))
    }

    fn spawn_wave(&mut self, now: f64, rng: &mut Pcg32) {
        self.enemies = self.formation.generate(&self.layout, &self.tuning, now, rng);
    }

    /// True when any enemy's next horizontal step would leave the playfield
    fn would_cross_wall(&self) -> bool {
        let dx = self.speed * self.direction;
        self.enemies.iter().any(|e| {
            let next_x = e.body.pos.x + dx;
            next_x < 0.0 || next_x + e.body.size.x > self.playfield_width
        })
    }

    /// Sweep sideways, or reverse and drop a row when a wall is reached
    fn march(&mut self) {
        if self.would_cross_wall() {
            self.direction = -self.direction;
            for enemy in &mut self.enemies {
                enemy.body.pos.y += self.tuning.step_down;
            }
        } else {
            let dx = self.speed * self.direction;
            for enemy in &mut self.enemies {
                enemy.body.pos.x += dx;
            }
        }
    }

    /// Match bullets against enemies. An enemy takes the first overlapping
    /// bullet; that bullet is removed so it can't score twice.
    fn resolve_hits(&mut self, now: f64, bullets: &mut Vec<Bullet>) {
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_hit()) {
            let Some(index) = bullets.iter().position(|b| b.body.overlaps(&enemy.body)) else {
                continue;
            };
            bullets.remove(index);
            enemy.strike(now, &self.tuning);
            self.score += self.tuning.score_per_hit;
            log::debug!(
                "Enemy hit at ({:.0}, {:.0}), score {}",
                enemy.body.pos.x,
                enemy.body.pos.y,
                self.score
            );
        }
    }

    /// Step every due animation and drop enemies that finished fading
    fn animate(&mut self, now: f64, rng: &mut Pcg32) {
        let tuning = &self.tuning;
        self.enemies.retain_mut(|enemy| enemy.animate(now, tuning, &mut *rng));
    }

    /// Respawn a faster wave once everything is gone
    fn check_wave_clear(&mut self, now: f64, bullets: &mut Vec<Bullet>, rng: &mut Pcg32) {
        if !self.enemies.is_empty() {
            return;
        }
        self.wave += 1;
        self.speed += self.tuning.speed_increment;
        self.direction = INITIAL_DIRECTION;
        bullets.clear();
        self.spawn_wave(now, rng);
        log::info!(
            "Wave {} cleared: speed {:.1}, score {}",
            self.wave,
            self.speed,
            self.score
        );
    }
}

impl Simulatable for Swarm {
    fn advance(&mut self, ctx: &mut TickContext<'_>) {
        self.march();
        self.resolve_hits(ctx.now, ctx.bullets);
        self.animate(ctx.now, ctx.rng);
        self.check_wave_clear(ctx.now, ctx.bullets, ctx.rng);
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        for enemy in &self.enemies {
            sink.enemy(&EnemySprite::from(enemy));
        }
    }

    fn reset(&mut self, now: f64, rng: &mut Pcg32) {
        self.direction = INITIAL_DIRECTION;
        self.speed = self.tuning.initial_speed;
        self.score = 0;
        self.wave = 0;
        self.spawn_wave(now, rng);
    }
}
