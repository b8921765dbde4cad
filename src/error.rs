//! Configuration errors
//!
//! The simulation itself has no failure modes; only malformed settings are
//! rejected, at construction time.

use thiserror::Error;

/// Errors raised while validating or parsing [`crate::Settings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A size, speed, or duration that must be strictly positive and finite.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Dotted settings path, e.g. `enemy.speed`.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// An offset that must be a finite number.
    #[error("{field} must be finite, got {value}")]
    NotFinite {
        /// Dotted settings path, e.g. `layout.offset_x`.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A formation with no enemies would be cleared (and respawned) every tick.
    #[error("formation has no enemies")]
    EmptyFormation,

    /// Reference grid dimensions used for centering must be non-zero.
    #[error("formation reference grid must be non-empty, got {cols}x{rows}")]
    EmptyReferenceGrid {
        /// `layout.reference_cols`.
        cols: u32,
        /// `layout.reference_rows`.
        rows: u32,
    },

    /// The first wave must start fully inside the side walls.
    #[error("formation spans x {left}..{right}, outside a {width}px playfield")]
    FormationOutOfBounds {
        /// Left edge of the leftmost column.
        left: f32,
        /// Right edge of the rightmost column.
        right: f32,
        /// Playfield width.
        width: f32,
    },

    /// The player box must fit inside the playfield.
    #[error("player ({size}px at y={y}) does not fit a {width}x{height} playfield")]
    PlayerOutOfBounds {
        /// Ship side length.
        size: f32,
        /// Ship top edge at spawn.
        y: f32,
        /// Playfield width.
        width: f32,
        /// Playfield height.
        height: f32,
    },

    /// Settings text could not be parsed.
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
