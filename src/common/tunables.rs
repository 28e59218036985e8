//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub player_speed: f32,
    pub player_turn_speed: f32,
    pub player_max_hp: i32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_lifetime_secs: f32,
    pub bullet_radius: f32,
    pub max_ammo: u32,
    pub reload_secs: f32,
    pub stagger_secs: f32,
    pub slow_factor: f32,
    pub block_hit_damage: i32,
    pub respawn_secs: f32,
    pub bonus_cadence_secs: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 260.0,
            player_turn_speed: 3.4,
            player_max_hp: 10,
            bullet_speed: 640.0,
            bullet_damage: 2,
            bullet_lifetime_secs: 1.6,
            bullet_radius: 4.0,
            max_ammo: 6,
            reload_secs: 0.8,
            stagger_secs: 0.12,
            slow_factor: 0.75,
            block_hit_damage: 2,
            respawn_secs: 2.5,
            bonus_cadence_secs: 6.0,
        }
    }
}

impl Tunables {
    /// Reject out-of-range configuration at insertion time instead of letting
    /// it surface as nonsense gameplay ten systems later.
    pub fn validated(self) -> Self {
        assert!(self.player_speed > 0.0, "player_speed must be positive");
        assert!(self.player_turn_speed > 0.0, "player_turn_speed must be positive");
        assert!(self.player_max_hp > 0, "player_max_hp must be positive");
        assert!(self.bullet_speed > 0.0, "bullet_speed must be positive");
        assert!(self.bullet_damage > 0, "bullet_damage must be positive");
        assert!(self.bullet_lifetime_secs > 0.0, "bullet_lifetime_secs must be positive");
        assert!(self.bullet_radius > 0.0, "bullet_radius must be positive");
        assert!(self.max_ammo > 0, "max_ammo must be positive");
        assert!(self.reload_secs > 0.0, "reload_secs must be positive");
        assert!(self.stagger_secs >= 0.0, "stagger_secs must not be negative");
        assert!(
            self.slow_factor > 0.0 && self.slow_factor <= 1.0,
            "slow_factor must be in (0, 1]"
        );
        assert!(self.block_hit_damage > 0, "block_hit_damage must be positive");
        assert!(self.respawn_secs > 0.0, "respawn_secs must be positive");
        assert!(self.bonus_cadence_secs > 0.0, "bonus_cadence_secs must be positive");
        self
    }
}
