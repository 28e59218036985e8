//! Passive area zones.
//!
//! Areas are not collidables: they carry no `Kind`, never enter the collision
//! index and never block movement. Each frame every player fully contained in
//! an area receives its effect — a speed factor while inside (restored the
//! frame no slowing area contains them) or lethal damage. Non-player entities
//! are never tested.

use bevy::prelude::*;

use super::components::{Health, Hitbox, Kind, LifeState, Speed, bounds_of};

#[derive(Component, Clone, Copy, Debug)]
pub struct Area {
    pub effect: AreaEffect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AreaEffect {
    Slowing { factor: f32 },
    Lethal,
}

impl AreaEffect {
    pub fn slowing(factor: f32) -> Self {
        assert!(
            factor > 0.0 && factor <= 1.0,
            "slowing factor must be in (0, 1], got {factor}"
        );
        Self::Slowing { factor }
    }
}

pub fn apply_areas(
    q_areas: Query<(&Area, &Hitbox, &Transform)>,
    mut q_players: Query<(&Kind, &LifeState, &Hitbox, &Transform, &mut Speed, &mut Health)>,
) {
    for (kind, life, hitbox, transform, mut speed, mut health) in &mut q_players {
        if *kind != Kind::Player || !life.is_active() {
            continue;
        }
        let player_bounds = bounds_of(hitbox, transform);

        let mut slow = 1.0_f32;
        for (area, area_hitbox, area_transform) in &q_areas {
            if !bounds_of(area_hitbox, area_transform).contains(&player_bounds) {
                continue;
            }
            match area.effect {
                AreaEffect::Slowing { factor } => slow = slow.min(factor),
                AreaEffect::Lethal => health.hp = 0,
            }
        }
        speed.area_factor = slow;
    }
}
