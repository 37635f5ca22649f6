//! Collision detection between enemies, the player and the active trail
//!
//! Every hitbox is a circle. Contact only counts while the player is off
//! revealed ground; the safe zone makes the player untouchable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use crate::within_radius;

/// What an enemy touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// The player marker itself
    Player,
    /// A trail point (index into the trail at the time of contact)
    Trail { index: usize },
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionResult {
    pub enemy_id: u32,
    pub kind: CollisionKind,
}

/// Circle-circle overlap between the player and an enemy
#[inline]
pub fn player_enemy_collision(player: &Player, enemy: &Enemy) -> bool {
    within_radius(player.pos, enemy.pos, enemy.radius + player.radius)
}

/// First trail point inside the enemy's radius, if any
pub fn trail_enemy_collision(trail: &[Vec2], enemy: &Enemy) -> Option<usize> {
    trail
        .iter()
        .position(|&point| within_radius(point, enemy.pos, enemy.radius))
}

/// Check one enemy: the player first, then the trail. At most one result.
pub fn enemy_collision(player: &Player, enemy: &Enemy) -> Option<CollisionResult> {
    if player.safe {
        return None;
    }
    let kind = if player_enemy_collision(player, enemy) {
        CollisionKind::Player
    } else {
        CollisionKind::Trail {
            index: trail_enemy_collision(&player.trail, enemy)?,
        }
    };
    Some(CollisionResult {
        enemy_id: enemy.id,
        kind,
    })
}

/// First contact in enemy order.
///
/// A hit costs a life and puts the player back on safe ground, so nothing
/// after the first hit could collide in the same tick.
pub fn find_collision(player: &Player, enemies: &[Enemy]) -> Option<CollisionResult> {
    enemies
        .iter()
        .find_map(|enemy| enemy_collision(player, enemy))
}
