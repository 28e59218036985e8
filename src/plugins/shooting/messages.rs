//! Buffered shooting messages.
//!
//! Producers create *intent* (fire toggles, spawn requests); a single
//! consumer applies each. `BulletSpawned` is the outbound notification
//! channel: the scene side listens to learn about entities it must track.

use bevy::prelude::*;

use super::patterns::BulletSpec;

/// Discrete fire-toggle input event. Edge-triggered: `firing = true` on
/// press, `false` on release.
#[derive(Message, Clone, Copy, Debug)]
pub struct FireToggle {
    pub firing: bool,
}

/// A delayed shot came due: create its bullet in the world.
#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBulletRequest {
    pub pos: Vec2,
    pub angle: f32,
    pub spec: BulletSpec,
    pub owner: Entity,
}

/// A bullet entity now exists.
#[derive(Message, Clone, Copy, Debug)]
pub struct BulletSpawned {
    pub bullet: Entity,
    pub owner: Entity,
}
