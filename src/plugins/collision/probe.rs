//! Per-axis movement probes against the collidable registry.
//!
//! `CollisionIndex` is the registry: a snapshot of every active collidable,
//! rebuilt at the top of each `FixedUpdate`. Snapshotting does two jobs at
//! once: movement systems can mutate their own `Transform`s without aliasing
//! the "everyone else" query, and entities spawned via `Commands` only join
//! the index at the start of the next frame — never mid-sweep.
//!
//! Movement systems must take `Res<CollisionIndex>`; running them without the
//! collision plugin installed is a wiring error and fails loudly as a missing
//! resource, it never silently skips collision checking.

use bevy::prelude::*;

use super::bounds::{Bounds, Shape};
use super::components::{Hitbox, Kind, LifeState, bounds_of};

#[derive(Clone, Copy, Debug)]
pub struct ColliderEntry {
    pub entity: Entity,
    pub kind: Kind,
    pub bounds: Bounds,
}

#[derive(Resource, Default, Debug)]
pub struct CollisionIndex {
    pub entries: Vec<ColliderEntry>,
}

/// Result of probing a proposed move. Blocking is per-axis so a mover blocked
/// on X can still slide along Y; `contacts` lists every probe-intersecting
/// partner exactly once so collision side effects happen even when the move
/// itself is rejected.
#[derive(Debug, Default)]
pub struct MoveCheck {
    pub blocked_x: bool,
    pub blocked_y: bool,
    pub contacts: Vec<Entity>,
}

impl MoveCheck {
    /// Commit only the unblocked axis components.
    pub fn resolve(&self, from: Vec2, to: Vec2) -> Vec2 {
        Vec2::new(
            if self.blocked_x { from.x } else { to.x },
            if self.blocked_y { from.y } else { to.y },
        )
    }
}

/// Test a proposed move from `from` to `to` with two single-axis probes:
/// `(to.x, from.y)` for X and `(from.x, to.y)` for Y. Any intersection on a
/// probe blocks that axis. The mover itself is skipped.
pub fn check_move(
    mover: Entity,
    shape: Shape,
    from: Vec2,
    to: Vec2,
    index: &CollisionIndex,
) -> MoveCheck {
    // Disposable copies of the mover's bounds; the real bounds move only
    // when the caller commits.
    let current = Bounds::new(from, shape);
    let probe_x = current.at(Vec2::new(to.x, from.y));
    let probe_y = current.at(Vec2::new(from.x, to.y));

    let mut check = MoveCheck::default();
    for entry in &index.entries {
        if entry.entity == mover {
            continue;
        }
        let on_x = probe_x.intersects(&entry.bounds);
        let on_y = probe_y.intersects(&entry.bounds);
        check.blocked_x |= on_x;
        check.blocked_y |= on_y;
        if on_x || on_y {
            check.contacts.push(entry.entity);
        }
    }
    check
}

/// Rebuild the registry snapshot from the current world state. Runs first in
/// `FixedUpdate`, before anything moves.
pub fn index_colliders(
    mut index: ResMut<CollisionIndex>,
    q: Query<(Entity, &Kind, &Hitbox, &Transform, &LifeState)>,
) {
    index.entries.clear();
    for (entity, kind, hitbox, transform, life) in &q {
        if !life.is_active() {
            continue;
        }
        index.entries.push(ColliderEntry {
            entity,
            kind: *kind,
            bounds: bounds_of(hitbox, transform),
        });
    }
}
