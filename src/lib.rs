//! Territory Rush - an area-conquest arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (territory mask, trail fill, enemies, stage flow)
//! - `config`: Surface, stage and entity tuning with validation
//! - `error`: Configuration errors
//!
//! Rendering, keyboard wiring and dialogs live outside this crate. They feed a
//! [`sim::TickInput`] in and read a [`sim::Snapshot`] back out each tick.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{CellRect, EnemyTuning, GameConfig, PlayerTuning};
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Fixed simulation timestep (one 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play surface, one mask cell per pixel
    pub const SURFACE_WIDTH: u32 = 800;
    pub const SURFACE_HEIGHT: u32 = 600;
    /// Side of the centered square revealed at stage start
    pub const SAFE_ZONE_SIZE: u32 = 120;

    /// Session rules
    pub const STAGE_COUNT: u32 = 5;
    pub const STAGE_TIME_SECS: f32 = 20.0;
    pub const STARTING_LIVES: u8 = 3;
    pub const WIN_COVERAGE_PERCENT: f32 = 50.0;

    /// Player defaults (pixels, pixels per tick)
    pub const PLAYER_RADIUS: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 3.0;

    /// Enemy defaults
    pub const ENEMY_COUNT: u32 = 5;
    pub const ENEMY_RADIUS: f32 = 50.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_MULTIPLIER_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_MULTIPLIER_MAX: f32 = 3.0;
    /// Per-tick chance that a patrolling enemy stops to spin
    pub const ENEMY_PAUSE_CHANCE: f64 = 0.002;
    /// Pause length in ticks, half-open range
    pub const ENEMY_PAUSE_MIN_TICKS: u32 = 30;
    pub const ENEMY_PAUSE_MAX_TICKS: u32 = 90;
    /// Spin magnitude while paused (radians per tick)
    pub const ENEMY_SPIN_MIN: f32 = 0.05;
    pub const ENEMY_SPIN_MAX: f32 = 0.15;

    /// Cosmetic sparks emitted behind an unsafe player
    pub const MAX_TRAIL_SPARKS: usize = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Strict circle overlap test: `dist(a, b) < radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}
