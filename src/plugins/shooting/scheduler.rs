//! Per-entity shooting state: ammunition, reload cadence and the stagger
//! queue.
//!
//! Firing is edge-triggered (Idle → Firing on toggle-on). Entering Firing
//! with ammunition available spends exactly one round and enqueues the active
//! pattern's shots; each shot's delay is `in-flight count at that exact angle
//! bucket × stagger cooldown`, with the counter bumped at enqueue time so
//! same-frame bursts stack their delays correctly.

use std::time::Duration;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::patterns::FirePattern;
use super::queue::{PendingShot, ShotQueue};

/// Rotation angles bucketed to hundredths of a degree, so "the exact same
/// firing angle" is a map key instead of an f32 comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AngleBucket(i32);

impl AngleBucket {
    pub fn from_radians(angle: f32) -> Self {
        Self(((angle.to_degrees() * 100.0).round() as i32).rem_euclid(36_000))
    }
}

#[derive(Component, Debug)]
pub struct Arsenal {
    ammo: u32,
    max_ammo: u32,
    reload: Timer,
    stagger_secs: f32,
    queue: ShotQueue,
    in_flight: HashMap<AngleBucket, u32>,
    pattern: FirePattern,
    firing: bool,
}

impl Arsenal {
    pub fn new(max_ammo: u32, reload_secs: f32, stagger_secs: f32, pattern: FirePattern) -> Self {
        assert!(max_ammo > 0, "max ammunition must be positive, got {max_ammo}");
        assert!(reload_secs > 0.0, "reload time must be positive, got {reload_secs}");
        assert!(stagger_secs >= 0.0, "stagger time must not be negative, got {stagger_secs}");
        Self {
            ammo: max_ammo,
            max_ammo,
            reload: Timer::from_seconds(reload_secs, TimerMode::Repeating),
            stagger_secs,
            queue: ShotQueue::default(),
            in_flight: HashMap::default(),
            pattern,
            firing: false,
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn pattern(&self) -> FirePattern {
        self.pattern
    }

    /// Swap the firing pattern. Ammunition and the reload timer carry over;
    /// in-flight stagger counters stay valid because they are per-arsenal,
    /// not per-pattern.
    pub fn set_pattern(&mut self, pattern: FirePattern) {
        self.pattern = pattern;
    }

    pub fn pending_shots(&self) -> usize {
        self.queue.len()
    }

    pub fn in_flight_at(&self, bucket: AngleBucket) -> u32 {
        self.in_flight.get(&bucket).copied().unwrap_or(0)
    }

    /// Apply a fire-toggle edge. Returns true when a volley was enqueued.
    /// Toggling on without ammunition is a gameplay no-op, not an error.
    pub fn toggle(&mut self, firing: bool, owner: Entity, facing: f32) -> bool {
        if self.firing == firing {
            return false;
        }
        self.firing = firing;
        if !firing {
            return false;
        }
        if self.ammo == 0 {
            debug!("fire toggled with empty magazine; ignoring");
            return false;
        }

        self.ammo -= 1;
        for shot in self.pattern.shots(facing) {
            let bucket = AngleBucket::from_radians(shot.angle);
            let queued = self.in_flight.entry(bucket).or_insert(0);
            let delay = *queued as f32 * self.stagger_secs;
            self.queue.push(PendingShot::new(delay, shot.angle, shot.spec, owner));
            *queued += 1;
        }
        true
    }

    /// Advance the reload timer and the pending-shot queue by one frame.
    /// Returns the shots that came due; their angle buckets are decremented
    /// here, at execution time.
    pub fn advance(&mut self, delta: Duration) -> Vec<PendingShot> {
        self.reload.tick(delta);
        let ticks = self.reload.times_finished_this_tick();
        // One tick = one round, clamped at capacity. Ticks while full are not
        // banked: a full magazine never stores up instant reloads.
        self.ammo = (self.ammo + ticks).min(self.max_ammo);

        let ready = self.queue.advance(delta);
        for shot in &ready {
            let bucket = AngleBucket::from_radians(shot.angle);
            if let Some(queued) = self.in_flight.get_mut(&bucket) {
                *queued = queued.saturating_sub(1);
            }
        }
        ready
    }
}
