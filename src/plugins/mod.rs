//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::{collision::CollisionPlugin, shooting::ShootingPlugin};

pub mod bonuses;
pub mod collision;
pub mod core;
pub mod player;
pub mod projectiles;
pub mod shooting;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    app.add_plugins(CollisionPlugin);
    world::plugin(app);
    player::plugin(app);
    app.add_plugins(ShootingPlugin);
    projectiles::plugin(app);
    bonuses::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
