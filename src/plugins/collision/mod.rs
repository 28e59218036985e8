//! Collision plugin: the entity-interaction core.
//!
//! # Data flow (big picture)
//! ```text
//! FixedUpdate
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  (A) index_colliders rebuilds CollisionIndex (the registry)      │
//! │      - active collidables only; Commands-spawned entities join   │
//! │        here next frame, never mid-sweep                          │
//! │                                                                  │
//! │  (B) movement systems (player / projectiles plugins)             │
//! │      - probe per axis against the index, commit unblocked axes   │
//! │      - write Contact for every probe intersection                │
//! └──────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//! FixedPostUpdate (chained)
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  (C) detect_overlaps: O(N²) sweep at current positions           │
//! │  (D) resolve_contacts: dedupe pairs, apply the 5×5 rule table    │
//! │  (E) apply_areas: slow/lethal zones on contained players         │
//! │  (F) deplete_exhausted: hp/durability <= 0 ⇒ Inactive            │
//! └──────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//! PostUpdate: despawn_inactive prunes, message buffers advance
//! ```
//!
//! The sweep is a broad phase with no spatial partitioning — fine for a
//! single-screen arcade level, and the first place to put a grid or quadtree
//! if entity counts ever grow.

pub mod areas;
pub mod bounds;
pub mod components;
pub mod probe;
pub mod resolve;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;

use components::{Contact, Durability, Health, Hitbox, Kind, LifeState, PickupAttempt, bounds_of};

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<probe::CollisionIndex>();

        // Message storage for the contact pipeline.
        app.init_resource::<Messages<Contact>>();
        app.init_resource::<Messages<PickupAttempt>>();
        app.add_systems(PostUpdate, update_contact_messages);

        app.add_systems(
            FixedUpdate,
            probe::index_colliders.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                detect_overlaps,
                resolve::resolve_contacts,
                areas::apply_areas,
                deplete_exhausted,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(PostUpdate, despawn_inactive.run_if(in_state(GameState::InGame)));
    }
}

/// Messages are double-buffered; `update()` advances buffers.
fn update_contact_messages(
    mut contacts: ResMut<Messages<Contact>>,
    mut pickups: ResMut<Messages<PickupAttempt>>,
) {
    contacts.update();
    pickups.update();
}

/// Pairwise overlap sweep at current positions. Catches contacts the movement
/// probes cannot see (a player standing still on a freshly spawned bonus).
pub fn detect_overlaps(
    q: Query<(Entity, &Hitbox, &Transform, &LifeState), With<Kind>>,
    mut writer: MessageWriter<Contact>,
) {
    let colliders: Vec<(Entity, bounds::Bounds)> = q
        .iter()
        .filter(|(_, _, _, life)| life.is_active())
        .map(|(entity, hitbox, transform, _)| (entity, bounds_of(hitbox, transform)))
        .collect();

    for (i, (a, a_bounds)) in colliders.iter().enumerate() {
        for (b, b_bounds) in &colliders[i + 1..] {
            if a_bounds.intersects(b_bounds) {
                writer.write(Contact { a: *a, b: *b });
            }
        }
    }
}

/// Flip entities whose health or durability ran out to Inactive. One flag,
/// one place; the despawn pass below does the structural change.
pub fn deplete_exhausted(
    mut q: Query<(&mut LifeState, Option<&Health>, Option<&Durability>)>,
) {
    for (mut life, health, durability) in &mut q {
        if !life.is_active() {
            continue;
        }
        let dead = health.is_some_and(|h| h.is_depleted())
            || durability.is_some_and(|d| d.is_depleted());
        if dead {
            *life = LifeState::Inactive;
        }
    }
}

/// Structural cleanup: inactive entities are removed once per frame, after
/// all per-entity updates for that frame have completed.
pub fn despawn_inactive(mut commands: Commands, q: Query<(Entity, &LifeState)>) {
    for (entity, life) in &q {
        if !life.is_active() {
            commands.entity(entity).despawn();
        }
    }
}
