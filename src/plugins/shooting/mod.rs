//! Shooting plugin: fire intent → staggered, ammunition-limited spawns.
//!
//! # Data flow (big picture)
//! ```text
//! Update
//!   input plugin writes FireToggle messages (discrete edges)
//!                │
//!                v
//! FixedUpdate (chained)
//!   (A) fire_control: consume toggles, spend ammo, enqueue PendingShots
//!       with per-angle-bucket stagger delays
//!   (B) advance_arsenals: tick reload + queues, drain due shots into
//!       SpawnBulletRequest messages (positioned in front of the owner)
//!                │
//!                v
//!   projectiles plugin consumes SpawnBulletRequest, spawns the entity and
//!   emits the BulletSpawned notification
//! ```
//!
//! Producers never touch the world; the consumer owns all structural writes.

pub mod messages;
pub mod patterns;
pub mod queue;
pub mod scheduler;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::collision::components::{Heading, Hitbox, LifeState};

use messages::{BulletSpawned, FireToggle, SpawnBulletRequest};
use scheduler::Arsenal;

/// Gap between the owner's bounds and a freshly spawned bullet, so the spawn
/// position is clear of the shooter on frame one.
const MUZZLE_GAP: f32 = 2.0;

pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Messages<FireToggle>>();
        app.init_resource::<Messages<SpawnBulletRequest>>();
        app.init_resource::<Messages<BulletSpawned>>();
        app.add_systems(PostUpdate, update_shooting_messages);

        app.add_systems(
            FixedUpdate,
            (fire_control, advance_arsenals)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}

/// Messages are double-buffered; `update()` advances buffers.
fn update_shooting_messages(
    mut toggles: ResMut<Messages<FireToggle>>,
    mut spawns: ResMut<Messages<SpawnBulletRequest>>,
    mut spawned: ResMut<Messages<BulletSpawned>>,
) {
    toggles.update();
    spawns.update();
    spawned.update();
}

/// Consume fire-toggle edges and push volleys into the owning arsenal.
pub fn fire_control(
    mut toggles: MessageReader<FireToggle>,
    mut q: Query<(Entity, &mut Arsenal, &Heading, &LifeState)>,
) {
    for toggle in toggles.read() {
        for (entity, mut arsenal, heading, life) in &mut q {
            if !life.is_active() {
                continue;
            }
            arsenal.toggle(toggle.firing, entity, heading.0);
        }
    }
}

/// Advance every arsenal one frame: reload ticks, stagger queues drain, and
/// due shots become spawn requests placed just in front of the owner.
pub fn advance_arsenals(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Arsenal, &Transform, &Hitbox, &LifeState)>,
    mut spawns: MessageWriter<SpawnBulletRequest>,
) {
    for (mut arsenal, transform, hitbox, life) in &mut q {
        if !life.is_active() {
            continue;
        }
        for shot in arsenal.advance(time.delta()) {
            let dir = Vec2::from_angle(shot.angle);
            let offset = hitbox.0.max_extent() * 0.5 + shot.spec.radius + MUZZLE_GAP;
            spawns.write(SpawnBulletRequest {
                pos: transform.translation.truncate() + dir * offset,
                angle: shot.angle,
                spec: shot.spec,
                owner: shot.owner,
            });
        }
    }
}
