//! Capsule Invaders - A browser arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (player, swarm choreography, collisions, waves)
//! - `renderer`: Drawing boundary between the simulation and the host canvas
//! - `settings`: Fixed game configuration, validated at construction
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Horizontal step per tick while a move key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the playfield bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    /// Firing animation runs 4 steps in 250ms
    pub const PLAYER_FIRE_FRAME_MS: f64 = 250.0 / 4.0;
    /// Frame lookup for the firing animation (not a linear count-up)
    pub const FIRING_SEQUENCE: [u8; 4] = [1, 2, 3, 0];

    /// Bullets
    pub const BULLET_SIZE: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 7.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const ENEMY_SPEED_INITIAL: f32 = 2.0;
    /// Added to the swarm speed each time a wave is cleared
    pub const ENEMY_SPEED_INCREMENT: f32 = 0.5;
    /// Vertical drop when the swarm bounces off a wall
    pub const ENEMY_STEP_DOWN: f32 = 20.0;
    pub const SCORE_PER_HIT: u64 = 10;

    /// Enemy animation cadence (ms per frame)
    pub const SPAWN_FRAME_MS: f64 = 100.0;
    pub const NORMAL_FRAME_MS: f64 = 200.0;
    pub const HIT_FRAME_MS: f64 = 60.0;
    /// Frames in every enemy animation cycle (spawn, normal, hit)
    pub const ENEMY_ANIM_FRAMES: u8 = 5;

    /// Enemy sprite sheet rows
    pub const ENEMY_ROW_NORMAL: u8 = 0;
    pub const ENEMY_ROW_HIT: u8 = 1;
    pub const ENEMY_SPAWN_ROWS: [u8; 2] = [2, 3];

    /// Formation layout
    pub const FORMATION_SPACING_X: f32 = 60.0;
    pub const FORMATION_SPACING_Y: f32 = 50.0;
    pub const FORMATION_OFFSET_X: f32 = 50.0;
    pub const FORMATION_OFFSET_Y: f32 = 50.0;
    /// Reference grid a full-size formation occupies (used for centering)
    pub const FORMATION_REFERENCE_COLS: u32 = 10;
    pub const FORMATION_REFERENCE_ROWS: u32 = 5;

    /// Sprite sheet cell sizes (source pixels)
    pub const PLAYER_SPRITE_SIZE: f64 = 64.0;
    pub const ENEMY_SPRITE_SIZE: f64 = 48.0;
}
