//! Player motion and trail tracking
//!
//! The trail is the ordered path the player leaves while off revealed ground.
//! It starts at the first unsafe position after a crossing and is handed back
//! exactly once, on the tick the player returns to revealed ground.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::TerritoryMask;
use crate::config::PlayerTuning;

/// How far inside the far walls the mask is sampled
const EDGE_INSET: f32 = 1e-3;

/// What the mask sample after a move did to the trail
#[derive(Debug, Clone, PartialEq)]
pub enum TrailStep {
    /// On revealed ground, and was already
    StillSafe,
    /// Stepped off revealed ground; a new trail starts here
    Left,
    /// Still outside; the current position was appended
    Extended,
    /// Back on revealed ground; the finished trail, ready to fill
    Returned(Vec<Vec2>),
}

/// The player marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Mirrors the mask under the player as of the last sample
    pub safe: bool,
    /// Non-empty only while `safe` is false
    pub trail: Vec<Vec2>,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            radius: tuning.radius,
            speed: tuning.speed,
            safe: true,
            trail: Vec::new(),
        }
    }

    /// Move one tick along `direction` (per-axis -1/0/1), clamped to the surface
    pub fn advance(&mut self, direction: Vec2, bounds: Vec2) {
        self.vel = direction * self.speed;
        self.pos = (self.pos + self.vel).clamp(Vec2::ZERO, bounds);
    }

    /// Sample the mask at the current position and update safety and trail.
    ///
    /// A player clamped onto the right or bottom wall samples the last cell.
    pub fn update_safety(&mut self, mask: &TerritoryMask) -> TrailStep {
        let far_edge = Vec2::new(mask.width() as f32, mask.height() as f32) - EDGE_INSET;
        let on_revealed = mask.is_revealed(self.pos.min(far_edge));
        match (on_revealed, self.safe) {
            (true, true) => TrailStep::StillSafe,
            (true, false) => {
                self.safe = true;
                TrailStep::Returned(std::mem::take(&mut self.trail))
            }
            (false, true) => {
                self.safe = false;
                self.trail.clear();
                self.trail.push(self.pos);
                TrailStep::Left
            }
            (false, false) => {
                self.trail.push(self.pos);
                TrailStep::Extended
            }
        }
    }

    /// Put the player back on safe ground with no trail (after a life loss)
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.safe = true;
        self.trail.clear();
    }
}
