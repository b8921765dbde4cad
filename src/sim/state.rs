//! Simulation entity types
//!
//! Plain data plus the small per-entity state transitions; the controllers in
//! `player` and `swarm` decide when those transitions fire.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Entity;
use crate::consts::*;
use crate::settings::EnemySettings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking normally
    Playing,
    /// An enemy reached the player's row; the session is frozen until restart
    GameOver,
}

/// A player projectile travelling straight up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Entity,
    /// Upward speed in pixels per tick
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            body: Entity::square(pos, size),
            speed,
        }
    }

    /// Move one tick upward
    #[inline]
    pub fn advance(&mut self) {
        self.body.pos.y -= self.speed;
    }

    /// Still inside the playfield (bullets are culled once they reach the top)
    #[inline]
    pub fn in_play(&self) -> bool {
        self.body.pos.y > 0.0
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    /// Sprite column, 0-3
    pub frame: u8,
    /// Sprite row: `mode` while idle, `mode + 1` while firing
    pub row: u8,
    /// Row bias for alternate sprite sheet variants
    pub mode: u8,
    pub firing: bool,
    /// Index into [`FIRING_SEQUENCE`]
    pub firing_step: usize,
    /// Clock time (ms) at which the next firing frame may be shown
    pub next_frame_time: f64,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            body: Entity::square(pos, size),
            frame: 0,
            row: 0,
            mode: 0,
            firing: false,
            firing_step: 0,
            next_frame_time: 0.0,
        }
    }
}

/// Enemy lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Materializing; not yet part of the normal animation cycle
    Spawning,
    /// Idle animation loop
    Normal,
    /// Struck by a bullet and fading out
    Hit,
}

/// A single invader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Entity,
    pub state: EnemyState,
    /// Sprite column, 0-4
    pub frame: u8,
    /// Sprite row (2 or 3 while spawning, 0 normal, 1 hit)
    pub row: u8,
    /// 0-1, only drops below 1 while fading out
    pub opacity: f32,
    /// Clock time (ms) at which the next animation frame may be shown
    pub next_frame_time: f64,
}

impl Enemy {
    /// Fresh enemy at the start of its spawn animation. The spawn row is a
    /// cosmetic coin flip between the two spawn sprite rows.
    pub fn spawn(pos: Vec2, size: f32, now: f64, tuning: &EnemySettings, rng: &mut impl Rng) -> Self {
        let row = if rng.random_bool(0.5) {
            ENEMY_SPAWN_ROWS[0]
        } else {
            ENEMY_SPAWN_ROWS[1]
        };
        Self {
            body: Entity::square(pos, size),
            state: EnemyState::Spawning,
            frame: 0,
            row,
            opacity: 1.0,
            next_frame_time: now + tuning.spawn_frame_ms,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.state == EnemyState::Hit
    }

    /// Enter the fade-out animation
    pub fn strike(&mut self, now: f64, tuning: &EnemySettings) {
        self.state = EnemyState::Hit;
        self.row = ENEMY_ROW_HIT;
        self.frame = 0;
        self.opacity = 1.0;
        self.next_frame_time = now + tuning.hit_frame_ms;
    }

    /// Advance one animation step if the deadline has passed.
    ///
    /// Returns `false` once a hit enemy has finished fading and should be
    /// removed from the swarm.
    pub fn animate(&mut self, now: f64, tuning: &EnemySettings, rng: &mut impl Rng) -> bool {
        if now < self.next_frame_time {
            return true;
        }

        match self.state {
            EnemyState::Spawning => {
                self.frame += 1;
                if self.frame >= ENEMY_ANIM_FRAMES {
                    self.state = EnemyState::Normal;
                    self.row = ENEMY_ROW_NORMAL;
                    // Desync the idle loop so the swarm doesn't flap in unison
                    self.frame = rng.random_range(0..ENEMY_ANIM_FRAMES);
                    self.next_frame_time = now + tuning.normal_frame_ms;
                } else {
                    self.next_frame_time = now + tuning.spawn_frame_ms;
                }
            }
            EnemyState::Normal => {
                self.frame = (self.frame + 1) % ENEMY_ANIM_FRAMES;
                self.next_frame_time = now + tuning.normal_frame_ms;
            }
            EnemyState::Hit => {
                self.frame += 1;
                self.opacity =
                    (1.0 - self.frame as f32 / ENEMY_ANIM_FRAMES as f32).clamp(0.0, 1.0);
                if self.frame >= ENEMY_ANIM_FRAMES {
                    return false;
                }
                self.next_frame_time = now + tuning.hit_frame_ms;
            }
        }
        true
    }
}
