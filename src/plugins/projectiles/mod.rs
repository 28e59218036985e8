//! Projectiles plugin: bullet entities, flight and lifetime.
//!
//! The spawn consumer is the single writer that turns `SpawnBulletRequest`
//! intent into world entities; it also emits the `BulletSpawned` notification
//! so the owning scene learns about the new entity. Spawns go through
//! `Commands`, so bullets join the collision index at the start of the next
//! frame, never mid-sweep.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::collision::bounds::Shape;
use crate::plugins::collision::components::{Contact, Heading, Hitbox, Kind, LifeState, Speed};
use crate::plugins::collision::probe::{CollisionIndex, check_move};
use crate::plugins::shooting::messages::{BulletSpawned, SpawnBulletRequest};

#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub damage: i32,
    pub owner: Entity,
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            move_bullets.after(crate::plugins::collision::probe::index_colliders),
            spawn_bullets.after(crate::plugins::shooting::advance_arsenals),
            tick_lifetimes,
        )
            .run_if(in_state(GameState::InGame)),
    );
}

/// Spawn consumer: one bullet entity per request.
pub fn spawn_bullets(
    mut commands: Commands,
    mut requests: MessageReader<SpawnBulletRequest>,
    mut spawned: MessageWriter<BulletSpawned>,
) {
    for req in requests.read() {
        let bullet = commands
            .spawn((
                Name::new("Bullet"),
                Kind::Bullet,
                Bullet { damage: req.spec.damage, owner: req.owner },
                Hitbox(Shape::circle(req.spec.radius)),
                LifeState::default(),
                Heading(req.angle),
                Speed::new(req.spec.speed),
                Lifetime(Timer::from_seconds(req.spec.lifetime_secs, TimerMode::Once)),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(req.spec.radius * 2.0)),
                    ..default()
                },
                Transform::from_translation(req.pos.extend(2.0)),
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        spawned.write(BulletSpawned { bullet, owner: req.owner });
    }
}

/// Fly each bullet along its heading, probing the registry per axis. A
/// blocked bullet stays put and lets resolution deactivate it from the
/// contacts the probe reported.
pub fn move_bullets(
    time: Res<Time<Fixed>>,
    index: Res<CollisionIndex>,
    mut contacts: MessageWriter<Contact>,
    mut q: Query<(Entity, &mut Transform, &Heading, &Speed, &Hitbox, &LifeState), With<Bullet>>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, heading, speed, hitbox, life) in &mut q {
        if !life.is_active() {
            continue;
        }
        let from = transform.translation.truncate();
        let to = from + Vec2::from_angle(heading.0) * speed.effective() * dt;

        let check = check_move(entity, hitbox.0, from, to, &index);
        for other in &check.contacts {
            contacts.write(Contact { a: entity, b: *other });
        }

        let committed = check.resolve(from, to);
        transform.translation.x = committed.x;
        transform.translation.y = committed.y;
    }
}

/// A bullet whose lifetime elapses deactivates; the shared cleanup pass
/// removes it.
pub fn tick_lifetimes(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Lifetime, &mut LifeState)>,
) {
    for (mut lifetime, mut life) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() && life.is_active() {
            *life = LifeState::Inactive;
        }
    }
}
