//! Game configuration
//!
//! Surface size, session rules and entity tuning. Every field has a default
//! taken from [`crate::consts`], so a JSON file only needs the keys it changes.
//! A config is validated before any stage is built from it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Axis-aligned block of cells, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CellRect {
    #[inline]
    pub fn contains_cell(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Whether a continuous point falls on one of the rect's cells
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x0 as f32 && p.x < self.x1 as f32 && p.y >= self.y0 as f32 && p.y < self.y1 as f32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x0 + self.x1) as f32 / 2.0,
            (self.y0 + self.y1) as f32 / 2.0,
        )
    }

    pub fn area(&self) -> u64 {
        (self.x1 - self.x0) as u64 * (self.y1 - self.y0) as u64
    }
}

/// Player movement and hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Hitbox radius (pixels)
    pub radius: f32,
    /// Distance moved per tick along each held axis (pixels)
    pub speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }
}

/// Enemy population, speed and pause behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Enemies spawned per stage
    pub count: u32,
    /// Hitbox radius (pixels)
    pub radius: f32,
    /// Speed before the random multiplier (pixels per tick)
    pub base_speed: f32,
    pub speed_multiplier_min: f32,
    pub speed_multiplier_max: f32,
    /// Per-tick chance of stopping to spin
    pub pause_chance: f64,
    /// Pause duration in ticks, `min..max`
    pub pause_min_ticks: u32,
    pub pause_max_ticks: u32,
    /// Spin magnitude while paused (radians per tick)
    pub spin_min: f32,
    pub spin_max: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            count: ENEMY_COUNT,
            radius: ENEMY_RADIUS,
            base_speed: ENEMY_BASE_SPEED,
            speed_multiplier_min: ENEMY_SPEED_MULTIPLIER_MIN,
            speed_multiplier_max: ENEMY_SPEED_MULTIPLIER_MAX,
            pause_chance: ENEMY_PAUSE_CHANCE,
            pause_min_ticks: ENEMY_PAUSE_MIN_TICKS,
            pause_max_ticks: ENEMY_PAUSE_MAX_TICKS,
            spin_min: ENEMY_SPIN_MIN,
            spin_max: ENEMY_SPIN_MAX,
        }
    }
}

impl EnemyTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::NoEnemies);
        }
        positive("enemy radius", self.radius)?;
        positive("enemy base speed", self.base_speed)?;
        ordered(
            "enemy speed multiplier",
            self.speed_multiplier_min,
            self.speed_multiplier_max,
        )?;
        positive("enemy speed multiplier", self.speed_multiplier_min)?;
        if !(0.0..=1.0).contains(&self.pause_chance) {
            return Err(ConfigError::InvalidProbability {
                name: "enemy pause chance",
                value: self.pause_chance,
            });
        }
        // Pause length is sampled from a half-open range, so it must be non-empty
        if self.pause_min_ticks == 0 || self.pause_min_ticks >= self.pause_max_ticks {
            return Err(ConfigError::InvalidRange {
                name: "enemy pause ticks",
                min: self.pause_min_ticks as f32,
                max: self.pause_max_ticks as f32,
            });
        }
        // A paused enemy always spins
        positive("enemy spin", self.spin_min)?;
        ordered("enemy spin", self.spin_min, self.spin_max)
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Surface size in pixels (one mask cell each)
    pub width: u32,
    pub height: u32,
    /// Centered rectangle revealed at stage start
    pub safe_zone_width: u32,
    pub safe_zone_height: u32,

    // === Session rules ===
    /// Number of stages, one backdrop each
    pub stage_count: u32,
    /// Countdown per stage attempt
    pub stage_time_secs: f32,
    pub starting_lives: u8,
    /// Revealed percentage that clears a stage
    pub win_coverage_percent: f32,

    // === Entities ===
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,

    // === Cosmetic ===
    /// Cap on trail sparks alive at once (0 disables them)
    pub max_sparks: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            safe_zone_width: SAFE_ZONE_SIZE,
            safe_zone_height: SAFE_ZONE_SIZE,

            stage_count: STAGE_COUNT,
            stage_time_secs: STAGE_TIME_SECS,
            starting_lives: STARTING_LIVES,
            win_coverage_percent: WIN_COVERAGE_PERCENT,

            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),

            max_sparks: MAX_TRAIL_SPARKS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing keys fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the config can produce a playable stage
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }
        // Enemies are spawned outside the safe zone, so some area must remain
        if self.safe_zone_width == 0
            || self.safe_zone_height == 0
            || self.safe_zone_width >= self.width
            || self.safe_zone_height >= self.height
        {
            return Err(ConfigError::SafeZoneOutOfBounds {
                zone_width: self.safe_zone_width,
                zone_height: self.safe_zone_height,
                width: self.width,
                height: self.height,
            });
        }
        if self.stage_count == 0 {
            return Err(ConfigError::NoStages);
        }
        positive("stage time", self.stage_time_secs)?;
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !(self.win_coverage_percent > 0.0 && self.win_coverage_percent <= 100.0) {
            return Err(ConfigError::WinThreshold(self.win_coverage_percent));
        }
        positive("player radius", self.player.radius)?;
        positive("player speed", self.player.speed)?;
        self.enemy.validate()
    }

    /// The initially revealed rectangle, centered on the surface
    pub fn safe_rect(&self) -> CellRect {
        let x0 = (self.width - self.safe_zone_width.min(self.width)) / 2;
        let y0 = (self.height - self.safe_zone_height.min(self.height)) / 2;
        CellRect {
            x0,
            y0,
            x1: x0 + self.safe_zone_width.min(self.width),
            y1: y0 + self.safe_zone_height.min(self.height),
        }
    }

    /// Surface size as a vector (upper clamp for positions)
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Where the player starts and respawns
    pub fn spawn_point(&self) -> Vec2 {
        self.bounds() / 2.0
    }

    /// Whether a stage follows `index`
    pub fn has_next_stage(&self, index: u32) -> bool {
        index + 1 < self.stage_count
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min >= 0.0 && min <= max && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stage_count, 5);
        assert_eq!(config.starting_lives, 3);
    }

    #[test]
    fn test_safe_rect_is_centered() {
        let config = GameConfig {
            width: 200,
            height: 200,
            safe_zone_width: 40,
            safe_zone_height: 40,
            ..Default::default()
        };
        let rect = config.safe_rect();
        assert_eq!(rect, CellRect { x0: 80, y0: 80, x1: 120, y1: 120 });
        assert_eq!(rect.area(), 1600);
        assert_eq!(rect.center(), config.spawn_point());
        assert!(rect.contains_point(Vec2::new(80.0, 119.9)));
        assert!(!rect.contains_point(Vec2::new(120.0, 100.0)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"width": 300, "enemy": {"count": 2}}"#).unwrap();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, SURFACE_HEIGHT);
        assert_eq!(config.enemy.count, 2);
        assert_eq!(config.enemy.radius, ENEMY_RADIUS);
    }

    #[test]
    fn test_zero_stages_rejected() {
        let err = GameConfig::from_json(r#"{"stage_count": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoStages));
    }

    #[test]
    fn test_zero_enemies_rejected() {
        let mut config = GameConfig::default();
        config.enemy.count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoEnemies)));
    }

    #[test]
    fn test_safe_zone_must_leave_room() {
        let config = GameConfig {
            width: 100,
            height: 100,
            safe_zone_width: 100,
            safe_zone_height: 40,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SafeZoneOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_bad_ranges_rejected() {
        let mut config = GameConfig::default();
        config.enemy.pause_min_ticks = 90;
        config.enemy.pause_max_ticks = 30;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange { .. })));

        let mut config = GameConfig::default();
        config.enemy.pause_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));

        let config = GameConfig {
            win_coverage_percent: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::WinThreshold(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = GameConfig::load("/nonexistent/territory-rush.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_has_next_stage() {
        let config = GameConfig::default();
        assert!(config.has_next_stage(0));
        assert!(config.has_next_stage(3));
        assert!(!config.has_next_stage(4));
    }
}
