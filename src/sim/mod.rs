//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only from the session's generator
//! - Stable iteration order (enemies by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod fill;
pub mod mask;
pub mod particles;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, CollisionResult, enemy_collision, find_collision};
pub use enemy::{Enemy, EnemyMode};
pub use fill::scan_polygon;
pub use mask::TerritoryMask;
pub use particles::{Spark, TrailSparks};
pub use player::{Player, TrailStep};
pub use snapshot::{EnemyView, PlayerView, Snapshot};
pub use state::{Backdrop, GameEvent, Session, SessionPhase, Stage};
pub use tick::{TickInput, tick};
