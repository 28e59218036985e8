//! The pending-shot queue: delayed one-shot actions for staggered spawns.
//!
//! Entries are enqueued in firing order with monotonically non-decreasing
//! delays per angle bucket, so the queue is delay-ordered by construction.
//! `advance` ticks every entry, then pops ready entries strictly from the
//! front, stopping at the first not-yet-ready one. A popped entry is gone —
//! the exactly-once contract lives at this call site, not in hidden state.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;

use super::patterns::BulletSpec;

/// One delayed bullet spawn: the payload plus its one-shot delay timer.
#[derive(Debug, Clone)]
pub struct PendingShot {
    pub delay: Timer,
    pub angle: f32,
    pub spec: BulletSpec,
    pub owner: Entity,
}

impl PendingShot {
    pub fn new(delay_secs: f32, angle: f32, spec: BulletSpec, owner: Entity) -> Self {
        Self {
            delay: Timer::from_seconds(delay_secs, TimerMode::Once),
            angle,
            spec,
            owner,
        }
    }
}

#[derive(Debug, Default)]
pub struct ShotQueue {
    entries: VecDeque<PendingShot>,
}

impl ShotQueue {
    pub fn push(&mut self, shot: PendingShot) {
        self.entries.push_back(shot);
    }

    /// Advance all delays by `delta` and drain the shots that came due, in
    /// FIFO order. Stops at the first entry that is still pending.
    pub fn advance(&mut self, delta: Duration) -> Vec<PendingShot> {
        for entry in &mut self.entries {
            entry.delay.tick(delta);
        }

        let mut ready = Vec::new();
        while self.entries.front().is_some_and(|e| e.delay.is_finished()) {
            if let Some(shot) = self.entries.pop_front() {
                ready.push(shot);
            }
        }
        ready
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
