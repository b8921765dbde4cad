//! Game settings
//!
//! Fixed configuration supplied when a session is constructed. Everything
//! defaults to the tuning constants in [`crate::consts`]; hosts may override
//! any subset from JSON. There is no runtime reconfiguration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::sim::Formation;

/// Playfield extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Player ship and bullet tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Ship is square
    pub size: f32,
    /// Pixels per tick while a move key is held
    pub speed: f32,
    /// Playfield height minus this is the ship's top edge
    pub bottom_offset: f32,
    pub bullet_size: f32,
    /// Pixels per tick, upward
    pub bullet_speed: f32,
    pub fire_frame_ms: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            bottom_offset: PLAYER_BOTTOM_OFFSET,
            bullet_size: BULLET_SIZE,
            bullet_speed: BULLET_SPEED,
            fire_frame_ms: PLAYER_FIRE_FRAME_MS,
        }
    }
}

/// Enemy swarm tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub size: f32,
    /// Swarm speed at the start of a session (pixels per tick)
    pub initial_speed: f32,
    /// Added after every cleared wave
    pub speed_increment: f32,
    /// Drop applied when the swarm hits a wall
    pub step_down: f32,
    pub spawn_frame_ms: f64,
    pub normal_frame_ms: f64,
    pub hit_frame_ms: f64,
    pub score_per_hit: u64,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            initial_speed: ENEMY_SPEED_INITIAL,
            speed_increment: ENEMY_SPEED_INCREMENT,
            step_down: ENEMY_STEP_DOWN,
            spawn_frame_ms: SPAWN_FRAME_MS,
            normal_frame_ms: NORMAL_FRAME_MS,
            hit_frame_ms: HIT_FRAME_MS,
            score_per_hit: SCORE_PER_HIT,
        }
    }
}

/// Formation placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Grid a full-size formation fills; narrower waves are centered in it
    pub reference_cols: u32,
    pub reference_rows: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing_x: FORMATION_SPACING_X,
            spacing_y: FORMATION_SPACING_Y,
            offset_x: FORMATION_OFFSET_X,
            offset_y: FORMATION_OFFSET_Y,
            reference_cols: FORMATION_REFERENCE_COLS,
            reference_rows: FORMATION_REFERENCE_ROWS,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: Playfield,
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub layout: LayoutSettings,
    /// Shape of every wave
    pub formation: Formation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            player: PlayerSettings::default(),
            enemy: EnemySettings::default(),
            layout: LayoutSettings::default(),
            formation: Formation::level_one(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the simulation silently misbehave
    /// (a zero speed never reaches a wall, an empty wave respawns forever).
    pub fn validate(&self) -> Result<()> {
        positive("playfield.width", self.playfield.width as f64)?;
        positive("playfield.height", self.playfield.height as f64)?;

        positive("player.size", self.player.size as f64)?;
        positive("player.speed", self.player.speed as f64)?;
        positive("player.bottom_offset", self.player.bottom_offset as f64)?;
        positive("player.bullet_size", self.player.bullet_size as f64)?;
        positive("player.bullet_speed", self.player.bullet_speed as f64)?;
        positive("player.fire_frame_ms", self.player.fire_frame_ms)?;

        positive("enemy.size", self.enemy.size as f64)?;
        positive("enemy.initial_speed", self.enemy.initial_speed as f64)?;
        positive("enemy.speed_increment", self.enemy.speed_increment as f64)?;
        positive("enemy.step_down", self.enemy.step_down as f64)?;
        positive("enemy.spawn_frame_ms", self.enemy.spawn_frame_ms)?;
        positive("enemy.normal_frame_ms", self.enemy.normal_frame_ms)?;
        positive("enemy.hit_frame_ms", self.enemy.hit_frame_ms)?;

        positive("layout.spacing_x", self.layout.spacing_x as f64)?;
        positive("layout.spacing_y", self.layout.spacing_y as f64)?;
        finite("layout.offset_x", self.layout.offset_x as f64)?;
        finite("layout.offset_y", self.layout.offset_y as f64)?;
        if self.layout.reference_cols == 0 || self.layout.reference_rows == 0 {
            return Err(ConfigError::EmptyReferenceGrid {
                cols: self.layout.reference_cols,
                rows: self.layout.reference_rows,
            });
        }

        if self.formation.count() == 0 {
            return Err(ConfigError::EmptyFormation);
        }

        let origin = self.formation.origin(&self.layout);
        let last_col = self.formation.cols().saturating_sub(1) as f32;
        let right = origin.x + last_col * self.layout.spacing_x + self.enemy.size;
        if origin.x < 0.0 || right > self.playfield.width {
            return Err(ConfigError::FormationOutOfBounds {
                left: origin.x,
                right,
                width: self.playfield.width,
            });
        }

        let start = self.player_start();
        let fits = self.player.size <= self.playfield.width
            && start.y >= 0.0
            && start.y + self.player.size <= self.playfield.height;
        if !fits {
            return Err(ConfigError::PlayerOutOfBounds {
                size: self.player.size,
                y: start.y,
                width: self.playfield.width,
                height: self.playfield.height,
            });
        }

        Ok(())
    }

    /// Player's construction-time position: horizontally centered, fixed
    /// distance above the bottom edge
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.playfield.width / 2.0 - self.player.size / 2.0,
            self.playfield.height - self.player.bottom_offset,
        )
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
