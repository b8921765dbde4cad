//! Wave formations
//!
//! A formation is a presence matrix: row-major cells, `true` where an enemy
//! stands. Generating a wave turns the matrix into enemies placed on the
//! layout grid, centered inside the reference grid so that narrower or
//! shorter shapes sit in the same region a full-size wave would.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Enemy;
use crate::settings::{EnemySettings, LayoutSettings};

/// Presence matrix for one wave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub cells: Vec<Vec<bool>>,
}

impl Default for Formation {
    fn default() -> Self {
        Self::level_one()
    }
}

impl Formation {
    /// Full rectangle of enemies
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![true; cols]; rows],
        }
    }

    /// Parse a text matrix: `X` marks an enemy, anything else is empty
    pub fn from_rows(rows: &[&str]) -> Self {
        Self {
            cells: rows
                .iter()
                .map(|row| row.chars().map(|c| c == 'X' || c == 'x').collect())
                .collect(),
        }
    }

    /// The first wave's shape
    pub fn level_one() -> Self {
        Self::from_rows(&[
            "..XXXX..",
            ".XXXXXX.",
            "XX.XX.XX",
            "XXXXXXXX",
            ".X.XX.X.",
        ])
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Width of the widest row (rows may be ragged)
    pub fn cols(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of enemies a wave of this shape contains
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// `(col, row)` of each present cell in row-major order
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|&(_, &present)| present)
                    .map(move |(col, _)| (col, row))
            })
            .collect()
    }

    /// Top-left corner of the formation after centering in the reference grid
    pub fn origin(&self, layout: &LayoutSettings) -> Vec2 {
        let spare_cols = layout.reference_cols as f32 - self.cols() as f32;
        let spare_rows = layout.reference_rows as f32 - self.rows() as f32;
        Vec2::new(
            layout.offset_x + spare_cols * layout.spacing_x / 2.0,
            layout.offset_y + spare_rows * layout.spacing_y / 2.0,
        )
    }

    /// Build a fresh wave of spawning enemies
    pub fn generate(
        &self,
        layout: &LayoutSettings,
        tuning: &EnemySettings,
        now: f64,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        let origin = self.origin(layout);
        let spacing = Vec2::new(layout.spacing_x, layout.spacing_y);

        self.positions()
            .into_iter()
            .map(|(col, row)| {
                let pos = origin + Vec2::new(col as f32, row as f32) * spacing;
                Enemy::spawn(pos, tuning.size, now, tuning, &mut *rng)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_positions_skip_empty_cells() {
        let formation = Formation::from_rows(&["X.X", ".X."]);
        assert_eq!(formation.positions(), vec![(0, 0), (2, 0), (1, 1)]);
        assert_eq!(formation.count(), 3);
        assert_eq!(formation.cols(), 3);
        assert_eq!(formation.rows(), 2);
    }

    #[test]
    fn test_full_grid_uses_base_offset() {
        let layout = LayoutSettings::default();
        let formation = Formation::grid(
            layout.reference_rows as usize,
            layout.reference_cols as usize,
        );
        assert_eq!(
            formation.origin(&layout),
            Vec2::new(layout.offset_x, layout.offset_y)
        );
    }

    #[test]
    fn test_narrow_formation_is_centered() {
        let layout = LayoutSettings::default();
        // 8 wide, 5 tall inside a 10x5 reference: shift by one column
        let origin = Formation::level_one().origin(&layout);
        assert_eq!(origin.x, layout.offset_x + layout.spacing_x);
        assert_eq!(origin.y, layout.offset_y);

        // Center of the shaped wave matches the center of the full grid
        let full_center = layout.offset_x + (layout.reference_cols - 1) as f32 * layout.spacing_x / 2.0;
        let shaped_center = origin.x + (8 - 1) as f32 * layout.spacing_x / 2.0;
        assert_eq!(full_center, shaped_center);
    }

    #[test]
    fn test_short_formation_centered_vertically() {
        let layout = LayoutSettings::default();
        let origin = Formation::grid(1, 10).origin(&layout);
        assert_eq!(origin.y, layout.offset_y + 2.0 * layout.spacing_y);
    }

    #[test]
    fn test_generate_places_spawning_enemies() {
        let layout = LayoutSettings::default();
        let tuning = EnemySettings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let formation = Formation::from_rows(&["X.X"]);

        let enemies = formation.generate(&layout, &tuning, 500.0, &mut rng);
        assert_eq!(enemies.len(), 2);

        let origin = formation.origin(&layout);
        assert_eq!(enemies[0].body.pos, origin);
        assert_eq!(enemies[1].body.pos, origin + Vec2::new(2.0 * layout.spacing_x, 0.0));
        for enemy in &enemies {
            assert_eq!(enemy.state, EnemyState::Spawning);
            assert_eq!(enemy.body.size, Vec2::splat(tuning.size));
            assert_eq!(enemy.next_frame_time, 500.0 + tuning.spawn_frame_ms);
        }
    }

    #[test]
    fn test_level_one_fits_default_playfield() {
        let settings = crate::Settings::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let enemies = settings
            .formation
            .generate(&settings.layout, &settings.enemy, 0.0, &mut rng);
        assert_eq!(enemies.len(), settings.formation.count());
        assert!(enemies.iter().all(|e| e.body.left() >= 0.0
            && e.body.right() <= settings.playfield.width));
    }
}
