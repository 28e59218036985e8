//! Unit tests for bonus pickups, timed effects and the cadence spawner.

#![cfg(test)]

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::collision::bounds::Shape;
use crate::plugins::collision::components::{
    Health, Hitbox, Kind, LifeState, PickupAttempt, Shield, Speed,
};
use crate::plugins::shooting::patterns::{BulletSpec, FirePattern};
use crate::plugins::shooting::scheduler::Arsenal;
use crate::plugins::world::LevelSpec;

use super::{ActiveEffects, BonusGift, BonusSpawner, Gift};

fn spec() -> BulletSpec {
    BulletSpec::new(2, 640.0, 1.6, 4.0)
}

fn pickup_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<PickupAttempt>>();
    world
}

fn spawn_pickup_player(world: &mut World) -> Entity {
    world
        .spawn((
            Kind::Player,
            Health::full(10),
            Shield::default(),
            Speed::new(260.0),
            Arsenal::new(6, 0.8, 0.1, FirePattern::Single(spec())),
            ActiveEffects::default(),
            LifeState::default(),
        ))
        .id()
}

fn spawn_gift(world: &mut World, gift: Gift) -> Entity {
    world
        .spawn((Kind::Bonus, BonusGift(gift), LifeState::default()))
        .id()
}

fn attempt_pickup(world: &mut World, bonus: Entity, player: Entity) {
    world.write_message(PickupAttempt { bonus, player });
    run_system_once(world, super::apply_pickups);
}

fn life_of(world: &World, e: Entity) -> LifeState {
    *world.get::<LifeState>(e).unwrap()
}

// --------------------------------------------------------------------------------------
// Pickups
// --------------------------------------------------------------------------------------

#[test]
fn heal_at_full_health_fails_and_the_bonus_survives() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    let bonus = spawn_gift(&mut world, Gift::heal(3));

    attempt_pickup(&mut world, bonus, player);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 10);
    // Application failed, so the pickup does not consume the bonus.
    assert_eq!(life_of(&world, bonus), LifeState::Active);
}

#[test]
fn heal_applies_and_consumes_the_bonus() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    world.get_mut::<Health>(player).unwrap().take_damage(5);
    let bonus = spawn_gift(&mut world, Gift::heal(3));

    attempt_pickup(&mut world, bonus, player);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 8);
    assert_eq!(life_of(&world, bonus), LifeState::Inactive);
}

#[test]
fn a_claimed_bonus_cannot_be_claimed_again() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    world.get_mut::<Health>(player).unwrap().take_damage(9);
    let bonus = spawn_gift(&mut world, Gift::heal(2));

    // Both a probe contact and the sweep may have produced an attempt.
    world.write_message(PickupAttempt { bonus, player });
    world.write_message(PickupAttempt { bonus, player });
    run_system_once(&mut world, super::apply_pickups);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 3, "heal applied once");
}

// --------------------------------------------------------------------------------------
// Timed effects: enter / exit pairs
// --------------------------------------------------------------------------------------

#[test]
fn shield_gift_lowers_damage_taken_and_expires() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    let bonus = spawn_gift(&mut world, Gift::shield(0.5, 8.0));

    attempt_pickup(&mut world, bonus, player);
    assert_eq!(world.get::<Shield>(player).unwrap().multiplier(), 0.5);
    assert!(world.get::<ActiveEffects>(player).unwrap().shield_active());
    assert_eq!(life_of(&world, bonus), LifeState::Inactive);

    world.insert_resource(fixed_time_with_delta(8.5));
    run_system_once(&mut world, super::tick_effects);

    assert_eq!(world.get::<Shield>(player).unwrap().multiplier(), 1.0);
    assert!(!world.get::<ActiveEffects>(player).unwrap().shield_active());
}

#[test]
fn haste_gift_scales_speed_and_restores_it() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    let bonus = spawn_gift(&mut world, Gift::haste(1.4, 8.0));

    attempt_pickup(&mut world, bonus, player);
    assert!((world.get::<Speed>(player).unwrap().effective() - 260.0 * 1.4).abs() < 1e-3);

    world.insert_resource(fixed_time_with_delta(9.0));
    run_system_once(&mut world, super::tick_effects);
    assert_eq!(world.get::<Speed>(player).unwrap().effective(), 260.0);
}

#[test]
fn weapon_gift_swaps_the_pattern_and_reverts_on_expiry() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);
    let bonus = spawn_gift(&mut world, Gift::weapon(FirePattern::Double(spec()), 6.0));

    attempt_pickup(&mut world, bonus, player);
    assert_eq!(
        world.get::<Arsenal>(player).unwrap().pattern(),
        FirePattern::Double(spec())
    );

    world.insert_resource(fixed_time_with_delta(6.5));
    run_system_once(&mut world, super::tick_effects);
    assert_eq!(
        world.get::<Arsenal>(player).unwrap().pattern(),
        FirePattern::Single(spec())
    );
}

#[test]
fn repickup_refreshes_the_timer_instead_of_stacking() {
    let mut world = pickup_world();
    let player = spawn_pickup_player(&mut world);

    let first = spawn_gift(&mut world, Gift::weapon(FirePattern::Double(spec()), 6.0));
    attempt_pickup(&mut world, first, player);

    // Halfway through, grab a second copy of the same gift.
    world.insert_resource(fixed_time_with_delta(3.0));
    run_system_once(&mut world, super::tick_effects);
    let second = spawn_gift(&mut world, Gift::weapon(FirePattern::Double(spec()), 6.0));
    attempt_pickup(&mut world, second, player);

    // Past the first gift's original expiry: still boosted.
    world.insert_resource(fixed_time_with_delta(4.0));
    run_system_once(&mut world, super::tick_effects);
    assert_eq!(
        world.get::<Arsenal>(player).unwrap().pattern(),
        FirePattern::Double(spec())
    );

    // The refreshed timer runs out: back to the original pattern, not to the
    // intermediate one.
    world.insert_resource(fixed_time_with_delta(3.0));
    run_system_once(&mut world, super::tick_effects);
    assert_eq!(
        world.get::<Arsenal>(player).unwrap().pattern(),
        FirePattern::Single(spec())
    );
}

// --------------------------------------------------------------------------------------
// Cadence spawner
// --------------------------------------------------------------------------------------

fn spawner_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LevelSpec::default());
    world.insert_resource(BonusSpawner::new(6.0));
    world
}

#[test]
fn cadence_tick_spawns_one_bonus_at_the_next_site() {
    let mut world = spawner_world();

    world.insert_resource(fixed_time_with_delta(6.0));
    run_system_once(&mut world, super::spawn_bonuses);

    let sites = world.resource::<LevelSpec>().bonus_sites.clone();
    let mut q = world.query::<(&BonusGift, &Transform)>();
    let (_, transform) = q.single(&world).expect("one bonus spawned");
    assert_eq!(transform.translation.truncate(), sites[0]);

    // A short tick later nothing new appears.
    world.insert_resource(fixed_time_with_delta(0.1));
    run_system_once(&mut world, super::spawn_bonuses);
    assert_eq!(world.query::<&BonusGift>().iter(&world).count(), 1);
}

#[test]
fn spawner_holds_off_while_every_site_is_occupied() {
    let mut world = spawner_world();
    let sites = world.resource::<LevelSpec>().bonus_sites.clone();
    for site in &sites {
        world.spawn((
            Kind::Bonus,
            BonusGift(Gift::heal(3)),
            Hitbox(Shape::circle(10.0)),
            LifeState::default(),
            Transform::from_translation(site.extend(1.0)),
        ));
    }

    world.insert_resource(fixed_time_with_delta(6.0));
    run_system_once(&mut world, super::spawn_bonuses);

    assert_eq!(world.query::<&BonusGift>().iter(&world).count(), sites.len());
}

#[test]
#[should_panic(expected = "heal amount must be positive")]
fn non_positive_heal_is_rejected() {
    let _ = Gift::heal(0);
}

#[test]
#[should_panic(expected = "shield multiplier must be positive")]
fn non_positive_shield_gift_is_rejected() {
    let _ = Gift::shield(-0.5, 8.0);
}
