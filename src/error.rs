//! Configuration errors
//!
//! The simulation itself never fails: bad coordinates, degenerate trails and
//! timer underflow are clamped in place. Only a configuration that cannot
//! produce a playable stage is reported, and it is reported before any stage
//! is built.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("safe zone {zone_width}x{zone_height} must be non-empty and fit strictly inside the {width}x{height} surface")]
    SafeZoneOutOfBounds {
        zone_width: u32,
        zone_height: u32,
        width: u32,
        height: u32,
    },

    #[error("at least one stage is required")]
    NoStages,

    #[error("at least one enemy is required")]
    NoEnemies,

    #[error("starting lives must be at least 1")]
    NoLives,

    #[error("win coverage must be in (0, 100], got {0}")]
    WinThreshold(f32),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} range {min}..{max} is empty or negative")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("stage {index} does not exist ({count} stages configured)")]
    StageOutOfRange { index: u32, count: u32 },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
