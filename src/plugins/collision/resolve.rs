//! Pairwise contact resolution.
//!
//! Collision rules are inherently pairwise, so resolution is a single match
//! over `(Kind, Kind)` — a closed 5×5 table instead of chained downcasts.
//! Contacts arrive as messages from both the movement probes and the overlap
//! sweep; a per-frame pair set deduplicates them so a pair resolves at most
//! once per frame. Double-counted bullet damage is the bug class this kills.
//!
//! Gameplay-expected outcomes (a bullet meeting its own shooter, a pair with
//! no rule) are no-ops by design, never errors.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::projectiles::Bullet;

use super::components::{Contact, Durability, Health, Kind, LifeState, PickupAttempt, Shield};

pub fn resolve_contacts(
    tunables: Res<Tunables>,
    mut contacts: MessageReader<Contact>,
    mut pickups: MessageWriter<PickupAttempt>,
    q_kind: Query<&Kind>,
    q_bullet: Query<&Bullet>,
    mut q_life: Query<&mut LifeState>,
    mut q_victim: Query<(&mut Health, Option<&Shield>)>,
    mut q_block: Query<&mut Durability>,
    // Per-frame dedupe: probes and the sweep may both report a pair.
    mut seen: Local<HashSet<(Entity, Entity)>>,
) {
    seen.clear();

    for contact in contacts.read() {
        let (a, b) = (contact.a, contact.b);
        let key = if a < b { (a, b) } else { (b, a) };
        if !seen.insert(key) {
            continue;
        }

        // A side already deactivated earlier this frame no longer interacts.
        let a_active = q_life.get(a).map(|l| l.is_active()).unwrap_or(false);
        let b_active = q_life.get(b).map(|l| l.is_active()).unwrap_or(false);
        if !a_active || !b_active {
            continue;
        }

        let (Ok(&ka), Ok(&kb)) = (q_kind.get(a), q_kind.get(b)) else {
            continue;
        };

        match (ka, kb) {
            (Kind::Bullet, Kind::Player) => {
                bullet_hits_player(a, b, &q_bullet, &mut q_life, &mut q_victim);
            }
            (Kind::Player, Kind::Bullet) => {
                bullet_hits_player(b, a, &q_bullet, &mut q_life, &mut q_victim);
            }
            (Kind::Bullet, Kind::Bullet) => {
                deactivate(&mut q_life, a);
                deactivate(&mut q_life, b);
            }
            (Kind::Bullet, Kind::Bonus) | (Kind::Bullet, Kind::SolidBlock) => {
                deactivate(&mut q_life, a);
            }
            (Kind::Bonus, Kind::Bullet) | (Kind::SolidBlock, Kind::Bullet) => {
                deactivate(&mut q_life, b);
            }
            (Kind::Bullet, Kind::BreakableBlock) => {
                bullet_hits_block(a, b, tunables.block_hit_damage, &mut q_life, &mut q_block);
            }
            (Kind::BreakableBlock, Kind::Bullet) => {
                bullet_hits_block(b, a, tunables.block_hit_damage, &mut q_life, &mut q_block);
            }
            (Kind::Bonus, Kind::Player) => {
                pickups.write(PickupAttempt { bonus: a, player: b });
            }
            (Kind::Player, Kind::Bonus) => {
                pickups.write(PickupAttempt { bonus: b, player: a });
            }
            // Every remaining pairing (players shoulder to shoulder, blocks,
            // bonuses resting against walls) has no contact effect.
            _ => {}
        }
    }
}

fn deactivate(q_life: &mut Query<&mut LifeState>, entity: Entity) {
    if let Ok(mut life) = q_life.get_mut(entity) {
        *life = LifeState::Inactive;
    }
}

fn bullet_hits_player(
    bullet: Entity,
    player: Entity,
    q_bullet: &Query<&Bullet>,
    q_life: &mut Query<&mut LifeState>,
    q_victim: &mut Query<(&mut Health, Option<&Shield>)>,
) {
    let Ok(shot) = q_bullet.get(bullet) else {
        return;
    };
    // A bullet never harms the player who fired it.
    if shot.owner == player {
        return;
    }

    deactivate(q_life, bullet);
    if let Ok((mut health, shield)) = q_victim.get_mut(player) {
        let scale = shield.map_or(1.0, |s| s.multiplier());
        health.take_damage(((shot.damage as f32) * scale).round() as i32);
    }
}

fn bullet_hits_block(
    bullet: Entity,
    block: Entity,
    hit_damage: i32,
    q_life: &mut Query<&mut LifeState>,
    q_block: &mut Query<&mut Durability>,
) {
    deactivate(q_life, bullet);
    if let Ok(mut durability) = q_block.get_mut(block) {
        durability.points -= hit_damage;
    }
}
