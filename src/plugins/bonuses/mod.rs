//! Bonuses plugin: pickups, timed effects and the cadence spawner.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED
//! ---------------------------
//! Effects are explicit enter/exit pairs keyed by effect kind:
//!
//! 1) TRUTH lives on the player: `Shield`, `Speed`, `Arsenal` hold the live
//!    values gameplay reads.
//! 2) `ActiveEffects` tracks which timed gifts are running, each slot holding
//!    the value to restore on exit. Re-pickup refreshes the timer instead of
//!    stacking, so enter/exit stays balanced.
//! 3) Collision resolution only classifies the pair; `apply_pickups` is the
//!    single writer that applies a gift and deactivates the bonus — and only
//!    deactivates it when the application actually succeeded (a heal at full
//!    health leaves the bonus in the world).
//!
//! The cadence spawner is deterministic: gifts and sites cycle round-robin,
//! no RNG anywhere.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collision::bounds::Shape;
use crate::plugins::collision::components::{
    Health, Hitbox, Kind, LifeState, PickupAttempt, Shield, Speed,
};
use crate::plugins::shooting::patterns::{BulletSpec, FirePattern};
use crate::plugins::shooting::scheduler::Arsenal;
use crate::plugins::world::LevelSpec;

/// What picking up this bonus grants.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BonusGift(pub Gift);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gift {
    Heal { amount: i32 },
    Shield { multiplier: f32, secs: f32 },
    Haste { multiplier: f32, secs: f32 },
    Weapon { pattern: FirePattern, secs: f32 },
}

impl Gift {
    pub fn heal(amount: i32) -> Self {
        assert!(amount > 0, "heal amount must be positive, got {amount}");
        Self::Heal { amount }
    }

    pub fn shield(multiplier: f32, secs: f32) -> Self {
        assert!(multiplier > 0.0, "shield multiplier must be positive, got {multiplier}");
        assert!(secs > 0.0, "shield duration must be positive, got {secs}");
        Self::Shield { multiplier, secs }
    }

    pub fn haste(multiplier: f32, secs: f32) -> Self {
        assert!(multiplier > 0.0, "haste multiplier must be positive, got {multiplier}");
        assert!(secs > 0.0, "haste duration must be positive, got {secs}");
        Self::Haste { multiplier, secs }
    }

    pub fn weapon(pattern: FirePattern, secs: f32) -> Self {
        assert!(secs > 0.0, "weapon duration must be positive, got {secs}");
        Self::Weapon { pattern, secs }
    }
}

#[derive(Debug, Clone)]
struct EffectSlot<T> {
    timer: Timer,
    restore: T,
}

/// Timed gifts currently running on a player, each remembering what to
/// restore when it expires.
#[derive(Component, Default, Debug)]
pub struct ActiveEffects {
    shield: Option<EffectSlot<f32>>,
    haste: Option<EffectSlot<f32>>,
    weapon: Option<EffectSlot<FirePattern>>,
}

impl ActiveEffects {
    pub fn shield_active(&self) -> bool {
        self.shield.is_some()
    }

    pub fn haste_active(&self) -> bool {
        self.haste.is_some()
    }

    pub fn weapon_active(&self) -> bool {
        self.weapon.is_some()
    }

    fn enter_shield(&mut self, shield: &mut Shield, multiplier: f32, secs: f32) {
        let timer = Timer::from_seconds(secs, TimerMode::Once);
        match self.shield.as_mut() {
            // Refresh keeps the original restore value.
            Some(slot) => slot.timer = timer,
            None => {
                self.shield = Some(EffectSlot { timer, restore: shield.multiplier() });
                shield.set_multiplier(multiplier);
            }
        }
    }

    fn enter_haste(&mut self, speed: &mut Speed, multiplier: f32, secs: f32) {
        let timer = Timer::from_seconds(secs, TimerMode::Once);
        match self.haste.as_mut() {
            Some(slot) => slot.timer = timer,
            None => {
                self.haste = Some(EffectSlot { timer, restore: speed.boost_factor });
                speed.set_boost(multiplier);
            }
        }
    }

    fn enter_weapon(&mut self, arsenal: &mut Arsenal, pattern: FirePattern, secs: f32) {
        let timer = Timer::from_seconds(secs, TimerMode::Once);
        match self.weapon.as_mut() {
            Some(slot) => slot.timer = timer,
            None => {
                self.weapon = Some(EffectSlot { timer, restore: arsenal.pattern() });
            }
        }
        arsenal.set_pattern(pattern);
    }
}

/// Round-robin bonus production over the level's bonus sites.
#[derive(Resource, Debug)]
pub struct BonusSpawner {
    timer: Timer,
    next_site: usize,
    next_gift: usize,
}

impl BonusSpawner {
    pub fn new(cadence_secs: f32) -> Self {
        assert!(cadence_secs > 0.0, "bonus cadence must be positive, got {cadence_secs}");
        Self {
            timer: Timer::from_seconds(cadence_secs, TimerMode::Repeating),
            next_site: 0,
            next_gift: 0,
        }
    }
}

pub fn plugin(app: &mut App) {
    let cadence = app.world().resource::<Tunables>().bonus_cadence_secs;
    app.insert_resource(BonusSpawner::new(cadence));

    app.add_systems(
        FixedUpdate,
        spawn_bonuses.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        FixedPostUpdate,
        (
            apply_pickups.after(crate::plugins::collision::resolve::resolve_contacts),
            tick_effects,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

/// Apply picked-up gifts. The bonus deactivates only when the gift applied.
pub fn apply_pickups(
    mut pickups: MessageReader<PickupAttempt>,
    q_gift: Query<&BonusGift>,
    mut q_life: Query<&mut LifeState>,
    mut q_player: Query<(&mut Health, &mut Shield, &mut Speed, &mut Arsenal, &mut ActiveEffects)>,
) {
    for pickup in pickups.read() {
        // The bonus may already be claimed or despawned.
        let bonus_active = q_life
            .get(pickup.bonus)
            .map(|l| l.is_active())
            .unwrap_or(false);
        if !bonus_active {
            continue;
        }
        let Ok(&BonusGift(gift)) = q_gift.get(pickup.bonus) else {
            continue;
        };
        let Ok((mut health, mut shield, mut speed, mut arsenal, mut effects)) =
            q_player.get_mut(pickup.player)
        else {
            continue;
        };

        let applied = match gift {
            Gift::Heal { amount } => health.heal(amount),
            Gift::Shield { multiplier, secs } => {
                effects.enter_shield(&mut shield, multiplier, secs);
                true
            }
            Gift::Haste { multiplier, secs } => {
                effects.enter_haste(&mut speed, multiplier, secs);
                true
            }
            Gift::Weapon { pattern, secs } => {
                effects.enter_weapon(&mut arsenal, pattern, secs);
                true
            }
        };

        if applied {
            debug!("bonus {:?} applied to {:?}", gift, pickup.player);
            if let Ok(mut life) = q_life.get_mut(pickup.bonus) {
                *life = LifeState::Inactive;
            }
        }
    }
}

/// Tick timed effects and restore the entered-from value on expiry.
pub fn tick_effects(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut ActiveEffects, &mut Shield, &mut Speed, &mut Arsenal)>,
) {
    let delta = time.delta();
    for (mut effects, mut shield, mut speed, mut arsenal) in &mut q {
        if let Some(mut slot) = effects.shield.take() {
            slot.timer.tick(delta);
            if slot.timer.is_finished() {
                shield.set_multiplier(slot.restore);
            } else {
                effects.shield = Some(slot);
            }
        }
        if let Some(mut slot) = effects.haste.take() {
            slot.timer.tick(delta);
            if slot.timer.is_finished() {
                speed.set_boost(slot.restore);
            } else {
                effects.haste = Some(slot);
            }
        }
        if let Some(mut slot) = effects.weapon.take() {
            slot.timer.tick(delta);
            if slot.timer.is_finished() {
                arsenal.set_pattern(slot.restore);
            } else {
                effects.weapon = Some(slot);
            }
        }
    }
}

/// The gift rotation the spawner cycles through.
fn gift_for(index: usize, tunables: &Tunables) -> Gift {
    let spec = BulletSpec::new(
        tunables.bullet_damage,
        tunables.bullet_speed,
        tunables.bullet_lifetime_secs,
        tunables.bullet_radius,
    );
    match index % 5 {
        0 => Gift::heal(3),
        1 => Gift::weapon(FirePattern::Double(spec), 10.0),
        2 => Gift::haste(1.4, 8.0),
        3 => Gift::shield(0.5, 8.0),
        _ => Gift::weapon(FirePattern::circular(spec, 8), 6.0),
    }
}

/// Produce a bonus each cadence tick, cycling sites and gifts. Holds off
/// while every site is occupied.
pub fn spawn_bonuses(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    level: Res<LevelSpec>,
    mut spawner: ResMut<BonusSpawner>,
    q_existing: Query<&LifeState, With<BonusGift>>,
) {
    if level.bonus_sites.is_empty() {
        return;
    }
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }

    let live = q_existing.iter().filter(|l| l.is_active()).count();
    if live >= level.bonus_sites.len() {
        return;
    }

    let site = level.bonus_sites[spawner.next_site % level.bonus_sites.len()];
    let gift = gift_for(spawner.next_gift, &tunables);
    spawner.next_site = spawner.next_site.wrapping_add(1);
    spawner.next_gift = spawner.next_gift.wrapping_add(1);

    commands.spawn((
        Name::new("Bonus"),
        Kind::Bonus,
        BonusGift(gift),
        Hitbox(Shape::circle(10.0)),
        LifeState::default(),
        Sprite {
            color: Color::srgb(0.4, 0.9, 0.45),
            custom_size: Some(Vec2::splat(20.0)),
            ..default()
        },
        Transform::from_translation(site.extend(1.0)),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
