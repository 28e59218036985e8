//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerCommands resource + FireToggle edges
//! - FixedUpdate: steer, then move with per-axis collision probes
//! - FixedPostUpdate: schedule respawns for players that died this frame
//!
//! Movement is kinematic: direction comes from the heading angle, the
//! displacement is speed × dt, and only unblocked axis components commit —
//! which is exactly what makes wall sliding work.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::bonuses::ActiveEffects;
use crate::plugins::collision::bounds::Shape;
use crate::plugins::collision::components::{
    Contact, Heading, Health, Hitbox, Kind, LifeState, Shield, Speed,
};
use crate::plugins::collision::probe::{CollisionIndex, check_move};
use crate::plugins::shooting::messages::FireToggle;
use crate::plugins::shooting::patterns::{BulletSpec, FirePattern};
use crate::plugins::shooting::scheduler::Arsenal;
use crate::plugins::world::LevelSpec;

#[derive(Component)]
pub struct Player;

/// Marker: this dead player already has a respawn pending.
#[derive(Component)]
pub struct RespawnScheduled;

/// Sampled input, refreshed every render frame and consumed by the fixed
/// step. Axes are -1, 0 or +1.
#[derive(Resource, Default, Debug)]
pub struct PlayerCommands {
    pub turn: f32,
    pub thrust: f32,
}

/// Delay timers for players waiting to re-enter the arena.
#[derive(Resource, Default, Debug)]
pub struct RespawnQueue {
    pending: Vec<Timer>,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerCommands::default())
        .insert_resource(RespawnQueue::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input)
        .add_systems(
            FixedUpdate,
            (
                (steer_players, move_players)
                    .chain()
                    .after(crate::plugins::collision::probe::index_colliders),
                tick_respawns,
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            schedule_respawns
                .after(crate::plugins::collision::deplete_exhausted)
                .run_if(in_state(GameState::InGame)),
        );
}

fn player_bundle(tunables: &Tunables, start: Vec2) -> impl Bundle {
    (
        Name::new("Player"),
        Player,
        Kind::Player,
        Hitbox(Shape::circle(13.0)),
        LifeState::default(),
        Health::full(tunables.player_max_hp),
        Shield::default(),
        Speed::new(tunables.player_speed),
        Heading(FRAC_PI_2),
        ActiveEffects::default(),
        Arsenal::new(
            tunables.max_ammo,
            tunables.reload_secs,
            tunables.stagger_secs,
            FirePattern::Single(BulletSpec::new(
                tunables.bullet_damage,
                tunables.bullet_speed,
                tunables.bullet_lifetime_secs,
                tunables.bullet_radius,
            )),
        ),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_translation(start.extend(1.0)),
        DespawnOnExit(GameState::InGame),
    )
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>, level: Res<LevelSpec>) {
    commands.spawn(player_bundle(&tunables, level.player_start));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut player_commands: ResMut<PlayerCommands>,
    mut toggles: MessageWriter<FireToggle>,
) {
    // Headless apps have no input plugin; that is not an error.
    let Some(keys) = keys else {
        return;
    };

    let mut turn = 0.0;
    if keys.pressed(KeyCode::KeyA) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        turn -= 1.0;
    }

    let mut thrust = 0.0;
    if keys.pressed(KeyCode::KeyW) {
        thrust += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        thrust -= 1.0;
    }

    player_commands.turn = turn;
    player_commands.thrust = thrust;

    if keys.just_pressed(KeyCode::Space) {
        toggles.write(FireToggle { firing: true });
    }
    if keys.just_released(KeyCode::Space) {
        toggles.write(FireToggle { firing: false });
    }
}

pub fn steer_players(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    player_commands: Res<PlayerCommands>,
    mut q: Query<(&mut Heading, &LifeState), With<Player>>,
) {
    if player_commands.turn == 0.0 {
        return;
    }
    let step = player_commands.turn * tunables.player_turn_speed * time.delta_secs();
    for (mut heading, life) in &mut q {
        if !life.is_active() {
            continue;
        }
        heading.0 = (heading.0 + step).rem_euclid(TAU);
    }
}

pub fn move_players(
    time: Res<Time<Fixed>>,
    index: Res<CollisionIndex>,
    player_commands: Res<PlayerCommands>,
    mut contacts: MessageWriter<Contact>,
    mut q: Query<(Entity, &mut Transform, &Heading, &Speed, &Hitbox, &LifeState), With<Player>>,
) {
    if player_commands.thrust == 0.0 {
        return;
    }
    let dt = time.delta_secs();
    for (entity, mut transform, heading, speed, hitbox, life) in &mut q {
        if !life.is_active() {
            continue;
        }
        let from = transform.translation.truncate();
        let to = from
            + Vec2::from_angle(heading.0) * (speed.effective() * player_commands.thrust * dt);

        let check = check_move(entity, hitbox.0, from, to, &index);
        for other in &check.contacts {
            contacts.write(Contact { a: entity, b: *other });
        }

        let committed = check.resolve(from, to);
        transform.translation.x = committed.x;
        transform.translation.y = committed.y;
    }
}

/// Queue a respawn for every player that deactivated this frame. The marker
/// keeps a dead player from being queued twice before the despawn pass runs.
pub fn schedule_respawns(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut queue: ResMut<RespawnQueue>,
    q: Query<(Entity, &LifeState), (With<Player>, Without<RespawnScheduled>)>,
) {
    for (entity, life) in &q {
        if life.is_active() {
            continue;
        }
        queue.pending.push(Timer::from_seconds(tunables.respawn_secs, TimerMode::Once));
        commands.entity(entity).insert(RespawnScheduled);
    }
}

/// Re-enter finished respawns at the level start, fresh health and arsenal.
pub fn tick_respawns(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    level: Res<LevelSpec>,
    mut queue: ResMut<RespawnQueue>,
) {
    let delta = time.delta();
    queue.pending.retain_mut(|timer| {
        timer.tick(delta);
        if timer.is_finished() {
            commands.spawn(player_bundle(&tunables, level.player_start));
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests;
