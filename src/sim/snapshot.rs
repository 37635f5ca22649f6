//! Read-only per-tick view for presentation
//!
//! Built after a tick completes, so it never shows a half-updated state.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::mask::TerritoryMask;
use super::particles::Spark;
use super::state::{Backdrop, Session, SessionPhase};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub safe: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub paused: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    /// 0-based
    pub stage_index: u32,
    pub player: PlayerView,
    pub trail: &'a [Vec2],
    pub enemies: Vec<EnemyView>,
    /// Revealed/unrevealed overlay
    pub mask: &'a TerritoryMask,
    pub coverage_percent: f32,
    pub lives: u8,
    pub timer_secs: f32,
    pub timer_expired: bool,
    pub backdrop: Backdrop,
    pub sparks: &'a [Spark],
    pub game_over: bool,
    pub stage_clear_prompt: bool,
    pub all_stages_complete: bool,
    /// Any terminal phase; only a restart continues
    pub awaiting_restart: bool,
}

impl<R: Rng> Session<R> {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let stage = &self.stage;
        Snapshot {
            stage_index: stage.index,
            player: PlayerView {
                pos: stage.player.pos,
                radius: stage.player.radius,
                safe: stage.player.safe,
            },
            trail: &stage.player.trail,
            enemies: stage
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    radius: e.radius,
                    rotation: e.rotation,
                    paused: e.is_paused(),
                })
                .collect(),
            mask: &stage.mask,
            coverage_percent: self.coverage,
            lives: self.lives,
            timer_secs: stage.timer,
            timer_expired: stage.timer_expired,
            backdrop: stage.backdrop,
            sparks: self.sparks.sparks(),
            game_over: self.phase == SessionPhase::GameOver,
            stage_clear_prompt: self.phase == SessionPhase::StageClearPrompt,
            all_stages_complete: self.phase == SessionPhase::AllStagesCleared,
            awaiting_restart: self.phase.awaiting_restart(),
        }
    }
}

/// One-line HUD: stage, area, lives, timer
impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stage {} | Area {:.1}% | Lives {} | Time {:.1}",
            self.stage_index + 1,
            self.coverage_percent,
            self.lives,
            self.timer_secs
        )
    }
}
