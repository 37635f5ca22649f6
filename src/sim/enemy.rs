//! Enemy swarm
//!
//! Enemies patrol unrevealed territory in straight lines, bouncing off revealed
//! ground and the surface edges. Now and then one stops, spins in place for a
//! while, then sets off on a fresh random heading.
//!
//! All randomness comes from the caller's generator so runs are reproducible.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mask::TerritoryMask;
use crate::config::{EnemyTuning, GameConfig};
use crate::polar_to_cartesian;

/// Enemy behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMode {
    /// Moving along `vel`
    Patrolling,
    /// Standing still and spinning
    Paused {
        /// Rotation added per tick (radians, never zero)
        spin: f32,
        /// Ticks spent paused so far
        elapsed: u32,
        /// Ticks until patrolling resumes
        duration: u32,
    },
}

/// A mobile obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Sprite orientation only; the hitbox is a circle
    pub rotation: f32,
    pub mode: EnemyMode,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            rotation: 0.0,
            mode: EnemyMode::Patrolling,
        }
    }

    /// Spawn at a uniformly random point outside the safe zone
    pub fn spawn<R: Rng>(id: u32, config: &GameConfig, rng: &mut R) -> Self {
        let safe = config.safe_rect();
        let bounds = config.bounds();
        // Validation guarantees area outside the safe zone, so this terminates
        let pos = loop {
            let candidate = Vec2::new(
                rng.random_range(0.0..bounds.x),
                rng.random_range(0.0..bounds.y),
            );
            if !safe.contains_point(candidate) {
                break candidate;
            }
        };
        let vel = random_velocity(&config.enemy, rng);
        Self::new(id, pos, vel, config.enemy.radius)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.mode, EnemyMode::Paused { .. })
    }

    /// Advance one tick
    pub fn step<R: Rng>(
        &mut self,
        mask: &TerritoryMask,
        tuning: &EnemyTuning,
        bounds: Vec2,
        rng: &mut R,
    ) {
        match self.mode {
            EnemyMode::Patrolling => {
                let tentative = self.pos + self.vel;
                if mask.is_revealed(tentative) {
                    // Claimed ground is off limits: turn around
                    self.vel = -self.vel;
                    self.pos += self.vel;
                } else {
                    self.pos = tentative;
                }

                if rng.random_bool(tuning.pause_chance) {
                    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let spin = sign * rng.random_range(tuning.spin_min..=tuning.spin_max);
                    let duration = rng.random_range(tuning.pause_min_ticks..tuning.pause_max_ticks);
                    self.mode = EnemyMode::Paused {
                        spin,
                        elapsed: 0,
                        duration,
                    };
                }
            }
            EnemyMode::Paused {
                spin,
                elapsed,
                duration,
            } => {
                self.rotation += spin;
                let elapsed = elapsed + 1;
                if elapsed >= duration {
                    self.vel = random_velocity(tuning, rng);
                    self.mode = EnemyMode::Patrolling;
                } else {
                    self.mode = EnemyMode::Paused {
                        spin,
                        elapsed,
                        duration,
                    };
                }
            }
        }

        // Hard walls, independent of the mask bounce
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }
}

/// Random heading at base speed times a random multiplier
fn random_velocity<R: Rng>(tuning: &EnemyTuning, rng: &mut R) -> Vec2 {
    let multiplier = rng.random_range(tuning.speed_multiplier_min..=tuning.speed_multiplier_max);
    let heading = rng.random_range(0.0..TAU);
    polar_to_cartesian(tuning.base_speed * multiplier, heading)
}
