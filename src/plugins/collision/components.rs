//! Shared collidable-entity components and collision-protocol messages.

use bevy::prelude::*;

use super::bounds::{Bounds, Shape};

/// Runtime identity of a collidable. Resolution dispatches on the *pair* of
/// kinds, so this stays a closed enum rather than an open trait.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Player,
    Bullet,
    Bonus,
    SolidBlock,
    BreakableBlock,
}

/// The entity's owned collision shape. World position comes from `Transform`;
/// [`bounds_of`] assembles the live bounds.
#[derive(Component, Clone, Copy, Debug)]
pub struct Hitbox(pub Shape);

pub fn bounds_of(hitbox: &Hitbox, transform: &Transform) -> Bounds {
    Bounds::new(transform.translation.truncate(), hitbox.0)
}

/// Entity lifecycle flag. Inactive entities are excluded from the collision
/// index, every probe and the overlap sweep, and are despawned by the
/// `PostUpdate` cleanup pass.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Active,
    Inactive,
}

impl LifeState {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        assert!(max > 0, "max health must be positive, got {max}");
        Self { hp: max, max }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    #[inline]
    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    /// Returns false when already at full health (the heal did not apply).
    pub fn heal(&mut self, amount: i32) -> bool {
        assert!(amount > 0, "heal amount must be positive, got {amount}");
        if self.hp >= self.max {
            return false;
        }
        self.hp = (self.hp + amount).min(self.max);
        true
    }
}

/// Remaining hit points of a breakable block.
#[derive(Component, Debug, Clone, Copy)]
pub struct Durability {
    pub points: i32,
}

impl Durability {
    pub fn new(points: i32) -> Self {
        assert!(points > 0, "durability must be positive, got {points}");
        Self { points }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.points <= 0
    }
}

/// Incoming-damage scale. 1.0 = unshielded; a shield bonus lowers it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Shield {
    multiplier: f32,
}

impl Default for Shield {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

impl Shield {
    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f32) {
        assert!(multiplier > 0.0, "shield multiplier must be positive, got {multiplier}");
        self.multiplier = multiplier;
    }
}

/// Kinematic speed. `effective()` folds in the passive area factor and any
/// haste bonus; both factors are re-derived each frame by their owners.
#[derive(Component, Debug, Clone, Copy)]
pub struct Speed {
    pub base: f32,
    pub area_factor: f32,
    pub boost_factor: f32,
}

impl Speed {
    pub fn new(base: f32) -> Self {
        assert!(base > 0.0, "base speed must be positive, got {base}");
        Self { base, area_factor: 1.0, boost_factor: 1.0 }
    }

    #[inline]
    pub fn effective(&self) -> f32 {
        self.base * self.area_factor * self.boost_factor
    }

    pub fn set_boost(&mut self, factor: f32) {
        assert!(factor > 0.0, "speed boost factor must be positive, got {factor}");
        self.boost_factor = factor;
    }
}

/// Facing angle in radians (0 = +X, counter-clockwise positive).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Heading(pub f32);

/// Two collidables touched this frame. Emitted by movement probes and the
/// overlap sweep; consumed (deduplicated) by contact resolution.
#[derive(Message, Clone, Copy, Debug)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
}

/// A player touched a bonus. Resolution only classifies the pair; the bonus
/// plugin owns the effect application and the success-gated despawn.
#[derive(Message, Clone, Copy, Debug)]
pub struct PickupAttempt {
    pub bonus: Entity,
    pub player: Entity,
}
