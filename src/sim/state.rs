//! Session and stage state
//!
//! A [`Session`] owns everything the simulation touches: config, generator,
//! lives, phase and the active [`Stage`]. A stage transition builds a whole new
//! `Stage` (mask, player, enemies, timer) and swaps it in, so no tick ever sees
//! a mix of old and new state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionKind, CollisionResult};
use super::enemy::Enemy;
use super::mask::TerritoryMask;
use super::particles::TrailSparks;
use super::player::Player;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Where the session is in its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ticking
    Running,
    /// Stage cleared with another stage available; waiting on a yes/no
    StageClearPrompt,
    /// Player turned down the next stage
    Declined,
    /// Last stage cleared
    AllStagesCleared,
    /// Out of lives
    GameOver,
}

impl SessionPhase {
    /// Terminal phases only leave through [`Session::restart`]
    pub fn awaiting_restart(&self) -> bool {
        matches!(
            self,
            SessionPhase::Declined | SessionPhase::AllStagesCleared | SessionPhase::GameOver
        )
    }
}

/// Background the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backdrop {
    /// The stage's own picture
    Stage(u32),
    /// Shown once the stage timer has run out
    Failure,
}

/// Something presentation may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A trail closed and revealed `cells` new cells
    AreaClaimed { cells: usize, coverage: f32 },
    /// An enemy hit the player or the trail
    LifeLost {
        lives: u8,
        enemy_id: u32,
        cause: CollisionKind,
    },
    /// Stage timer hit zero; this attempt can no longer be cleared
    TimerExpired { stage: u32 },
    /// Coverage target met, next stage available
    StageClearPrompt { stage: u32 },
    /// Next stage accepted and loaded
    StageAdvanced { stage: u32 },
    StageDeclined { stage: u32 },
    AllStagesCleared,
    GameOver { stage: u32 },
    Restarted,
}

/// One stage attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// 0-based stage number
    pub index: u32,
    pub mask: TerritoryMask,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    /// Seconds remaining, never negative
    pub timer: f32,
    /// Sticky until the next stage load
    pub timer_expired: bool,
    pub backdrop: Backdrop,
    /// Player start and respawn point
    pub spawn: Vec2,
}

impl Stage {
    /// Build stage `index` from scratch
    pub fn load<R: Rng>(index: u32, config: &GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        if index >= config.stage_count {
            return Err(ConfigError::StageOutOfRange {
                index,
                count: config.stage_count,
            });
        }

        let mask = TerritoryMask::with_safe_zone(config.width, config.height, config.safe_rect());
        let spawn = config.spawn_point();
        let enemies = (0..config.enemy.count)
            .map(|id| Enemy::spawn(id, config, rng))
            .collect();

        log::info!(
            "Stage {} loaded: {} enemies, {:.1}% revealed, {:.0}s on the clock",
            index + 1,
            config.enemy.count,
            mask.coverage_percent(),
            config.stage_time_secs
        );

        Ok(Self {
            index,
            mask,
            player: Player::new(spawn, &config.player),
            enemies,
            timer: config.stage_time_secs,
            timer_expired: false,
            backdrop: Backdrop::Stage(index),
            spawn,
        })
    }

    /// Count the timer down by `dt`. Returns true on the tick it expires.
    pub fn advance_timer(&mut self, dt: f32) -> bool {
        if self.timer_expired {
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = 0.0;
            self.timer_expired = true;
            self.backdrop = Backdrop::Failure;
            return true;
        }
        false
    }

    pub fn coverage_percent(&self) -> f32 {
        self.mask.coverage_percent()
    }
}

/// Complete session state
#[derive(Debug)]
pub struct Session<R = Pcg32> {
    pub(crate) config: GameConfig,
    pub(crate) rng: R,
    /// Active stage; replaced wholesale on transitions
    pub stage: Stage,
    pub lives: u8,
    pub phase: SessionPhase,
    /// Coverage as of the last tick
    pub coverage: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic sparks behind an unsafe player
    pub sparks: TrailSparks,
    pub(crate) events: Vec<GameEvent>,
}

impl Session<Pcg32> {
    /// Start a session with a seeded generator
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Start a session drawing all randomness from `rng`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let stage = Stage::load(0, &config, &mut rng)?;
        let sparks = TrailSparks::new(rng.random(), config.max_sparks);
        Ok(Self {
            lives: config.starting_lives,
            coverage: stage.coverage_percent(),
            config,
            rng,
            stage,
            phase: SessionPhase::Running,
            time_ticks: 0,
            sparks,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swap in a freshly built stage
    fn load_stage(&mut self, index: u32) -> Result<(), ConfigError> {
        self.stage = Stage::load(index, &self.config, &mut self.rng)?;
        self.coverage = self.stage.coverage_percent();
        self.sparks.clear();
        Ok(())
    }

    /// Apply a hit: one life down, player back to the spawn point.
    ///
    /// Stage, mask, enemies and timer are untouched. Ignored once the game is over.
    pub fn lose_life(&mut self, hit: CollisionResult) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.stage.player.respawn(self.stage.spawn);
        self.events.push(GameEvent::LifeLost {
            lives: self.lives,
            enemy_id: hit.enemy_id,
            cause: hit.kind,
        });
        log::info!(
            "Life lost to enemy {} ({:?}), {} left",
            hit.enemy_id,
            hit.kind,
            self.lives
        );

        if self.lives == 0 {
            self.phase = SessionPhase::GameOver;
            self.events.push(GameEvent::GameOver {
                stage: self.stage.index,
            });
            log::info!("Game over on stage {}", self.stage.index + 1);
        }
    }

    /// Answer the stage-clear prompt. Ignored outside that phase.
    pub fn resolve_stage_prompt(&mut self, accept: bool) -> Result<(), ConfigError> {
        if self.phase != SessionPhase::StageClearPrompt {
            log::warn!("Stage prompt answered while {:?}, ignoring", self.phase);
            return Ok(());
        }

        let cleared = self.stage.index;
        if accept {
            self.load_stage(cleared + 1)?;
            self.phase = SessionPhase::Running;
            self.events.push(GameEvent::StageAdvanced {
                stage: self.stage.index,
            });
            log::info!("Advancing to stage {}", self.stage.index + 1);
        } else {
            self.phase = SessionPhase::Declined;
            self.events.push(GameEvent::StageDeclined { stage: cleared });
            log::info!("Stage {} cleared, next stage declined", cleared + 1);
        }
        Ok(())
    }

    /// Full reset: lives, stage 0, fresh stage state
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.load_stage(0)?;
        self.lives = self.config.starting_lives;
        self.phase = SessionPhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("Session restarted");
        Ok(())
    }
}
