//! Unit tests for player steering, movement and respawn.

#![cfg(test)]

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::collision::bounds::{Bounds, Shape};
use crate::plugins::collision::components::{Contact, Heading, Hitbox, Kind, LifeState, Speed};
use crate::plugins::collision::probe::{ColliderEntry, CollisionIndex};
use crate::plugins::world::LevelSpec;

use super::{Player, PlayerCommands, RespawnQueue, RespawnScheduled};

fn movement_world() -> World {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(0.1));
    world.insert_resource(Tunables::default());
    world.init_resource::<CollisionIndex>();
    world.init_resource::<Messages<Contact>>();
    world.insert_resource(PlayerCommands::default());
    world
}

fn spawn_test_player(world: &mut World, pos: Vec2, heading: f32) -> Entity {
    world
        .spawn((
            Player,
            Kind::Player,
            Hitbox(Shape::circle(5.0)),
            LifeState::default(),
            Heading(heading),
            Speed::new(100.0),
            Transform::from_translation(pos.extend(1.0)),
        ))
        .id()
}

#[test]
fn spawn_creates_a_player_with_full_kit() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LevelSpec::default());

    run_system_once(&mut world, super::spawn);

    let mut q = world.query::<(&Player, &Kind, &LifeState, &Heading)>();
    let (_, kind, life, _) = q.single(&world).expect("exactly one player");
    assert_eq!(*kind, Kind::Player);
    assert!(life.is_active());
}

#[test]
fn steering_turns_and_wraps_the_heading() {
    let mut world = movement_world();
    world.resource_mut::<PlayerCommands>().turn = 1.0;
    // Start just shy of a full turn so the wrap triggers.
    let player = spawn_test_player(&mut world, Vec2::ZERO, TAU - 0.1);

    run_system_once(&mut world, super::steer_players);

    let heading = world.get::<Heading>(player).unwrap().0;
    let expected = (TAU - 0.1 + 3.4 * 0.1).rem_euclid(TAU);
    assert!((heading - expected).abs() < 1e-5);
    assert!(heading < TAU);
}

#[test]
fn diagonal_movement_blocked_on_x_commits_only_y() {
    let mut world = movement_world();
    world.resource_mut::<PlayerCommands>().thrust = 1.0;
    let player = spawn_test_player(&mut world, Vec2::ZERO, FRAC_PI_4);
    let wall = world.spawn_empty().id();

    // A wall to the right: x probe hits, y probe clears it.
    world.resource_mut::<CollisionIndex>().entries.push(ColliderEntry {
        entity: wall,
        kind: Kind::SolidBlock,
        bounds: Bounds::new(Vec2::new(20.0, 0.0), Shape::rect(20.0, 200.0)),
    });

    run_system_once(&mut world, super::move_players);

    let pos = world.get::<Transform>(player).unwrap().translation;
    let step = 100.0 * 0.1 * FRAC_PI_4.cos();
    assert_eq!(pos.x, 0.0, "blocked axis must not move");
    assert!((pos.y - step).abs() < 1e-4, "free axis must move");

    // The rejected move still produced a collision event.
    let contacts: Vec<Contact> = world.resource_mut::<Messages<Contact>>().drain().collect();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].b, wall);
}

#[test]
fn free_movement_commits_both_axes() {
    let mut world = movement_world();
    world.resource_mut::<PlayerCommands>().thrust = 1.0;
    let player = spawn_test_player(&mut world, Vec2::ZERO, 0.0);

    run_system_once(&mut world, super::move_players);

    let pos = world.get::<Transform>(player).unwrap().translation;
    assert!((pos.x - 10.0).abs() < 1e-4);
}

#[test]
fn movement_without_the_collision_index_fails_loudly() {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(0.1));
    world.insert_resource(PlayerCommands { turn: 0.0, thrust: 1.0 });
    world.init_resource::<Messages<Contact>>();
    spawn_test_player(&mut world, Vec2::ZERO, 0.0);

    assert!(world.run_system_once(super::move_players).is_err());
}

#[test]
fn dead_players_are_scheduled_for_respawn_exactly_once() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<RespawnQueue>();
    let player = spawn_test_player(&mut world, Vec2::ZERO, 0.0);
    *world.get_mut::<LifeState>(player).unwrap() = LifeState::Inactive;

    run_system_once(&mut world, super::schedule_respawns);
    run_system_once(&mut world, super::schedule_respawns);

    assert_eq!(world.resource::<RespawnQueue>().pending.len(), 1);
    assert!(world.get::<RespawnScheduled>(player).is_some());
}

#[test]
fn respawn_timer_recreates_the_player_at_the_start() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LevelSpec::default());
    world.insert_resource(fixed_time_with_delta(3.0));
    world.insert_resource(RespawnQueue {
        pending: vec![Timer::from_seconds(2.5, TimerMode::Once)],
    });

    run_system_once(&mut world, super::tick_respawns);

    assert!(world.resource::<RespawnQueue>().pending.is_empty());
    let mut q = world.query::<(&Player, &Transform)>();
    let (_, transform) = q.single(&world).expect("respawned player");
    assert_eq!(
        transform.translation.truncate(),
        world.resource::<LevelSpec>().player_start
    );
}

#[test]
fn pending_respawn_waits_out_its_delay() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LevelSpec::default());
    world.insert_resource(fixed_time_with_delta(1.0));
    world.insert_resource(RespawnQueue {
        pending: vec![Timer::from_seconds(2.5, TimerMode::Once)],
    });

    run_system_once(&mut world, super::tick_respawns);

    assert_eq!(world.resource::<RespawnQueue>().pending.len(), 1);
    assert!(world.query::<&Player>().iter(&world).next().is_none());
}
