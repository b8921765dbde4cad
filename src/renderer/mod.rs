//! Rendering boundary
//!
//! The simulation never draws. Each tick it describes poses to a
//! [`RenderSink`]; the host decides how to turn those into pixels (sprite
//! atlas when the art is loaded, solid rectangles otherwise).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Enemy, Entity, Player};

/// Player draw pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub body: Entity,
    pub frame: u8,
    pub row: u8,
}

impl From<&Player> for PlayerPose {
    fn from(player: &Player) -> Self {
        Self {
            body: player.body,
            frame: player.frame,
            row: player.row,
        }
    }
}

/// Enemy draw pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySprite {
    pub body: Entity,
    pub frame: u8,
    pub row: u8,
    pub opacity: f32,
}

impl From<&Enemy> for EnemySprite {
    fn from(enemy: &Enemy) -> Self {
        Self {
            body: enemy.body,
            frame: enemy.frame,
            row: enemy.row,
            opacity: enemy.opacity,
        }
    }
}

/// Drawing surface the simulation writes poses to
pub trait RenderSink {
    fn player(&mut self, pose: &PlayerPose);
    fn enemy(&mut self, sprite: &EnemySprite);
    fn bullet(&mut self, bullet: &Entity);
}

/// Recorded poses for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub player: Option<PlayerPose>,
    pub enemies: Vec<EnemySprite>,
    pub bullets: Vec<Entity>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, keeping allocations
    pub fn clear(&mut self) {
        self.player = None;
        self.enemies.clear();
        self.bullets.clear();
    }
}

impl RenderSink for DrawList {
    fn player(&mut self, pose: &PlayerPose) {
        self.player = Some(*pose);
    }

    fn enemy(&mut self, sprite: &EnemySprite) {
        self.enemies.push(*sprite);
    }

    fn bullet(&mut self, bullet: &Entity) {
        self.bullets.push(*bullet);
    }
}
