//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - we then call `arena_blast::game::configure_headless` to install gameplay plugins.
//!
//! `TimeUpdateStrategy::ManualDuration` pins each `app.update()` to a fixed
//! wall-clock step so the fixed schedule ticks deterministically in tests.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));

    arena_blast::game::configure_headless(&mut app);
    app
}
