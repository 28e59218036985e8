//! World plugin: validated level data and arena spawning.
//!
//! The core never parses files. `LevelSpec` is already-parsed placement data
//! handed in by the embedding scene; `validated()` rejects out-of-range
//! values at load time. Everything spawned here is intentionally asset-free:
//! plain sprites over the shared collidable components.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::collision::areas::{Area, AreaEffect};
use crate::plugins::collision::bounds::Shape;
use crate::plugins::collision::components::{Durability, Hitbox, Kind, LifeState};

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 16;
const HALF_H: i32 = TILE * 9;
const WALL_THICKNESS: f32 = 30.0;

#[derive(Clone, Copy, Debug)]
pub struct WallSpec {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct BlockSpec {
    pub pos: Vec2,
    pub size: Vec2,
    pub durability: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct AreaSpec {
    pub pos: Vec2,
    pub shape: Shape,
    pub effect: AreaEffect,
}

/// Already-parsed level placement data.
#[derive(Resource, Clone, Debug)]
pub struct LevelSpec {
    pub player_start: Vec2,
    pub walls: Vec<WallSpec>,
    pub breakables: Vec<BlockSpec>,
    pub areas: Vec<AreaSpec>,
    pub bonus_sites: Vec<Vec2>,
}

impl LevelSpec {
    /// Fail fast on out-of-range placement data. Geometry inside `Shape` is
    /// validated by its own constructors; this covers the raw sizes and
    /// resource values that arrive as plain numbers.
    pub fn validated(self) -> Self {
        for wall in &self.walls {
            assert!(
                wall.size.x > 0.0 && wall.size.y > 0.0,
                "wall dimensions must be positive, got {}x{}",
                wall.size.x,
                wall.size.y
            );
        }
        for block in &self.breakables {
            assert!(
                block.size.x > 0.0 && block.size.y > 0.0,
                "block dimensions must be positive, got {}x{}",
                block.size.x,
                block.size.y
            );
            assert!(
                block.durability > 0,
                "block durability must be positive, got {}",
                block.durability
            );
        }
        self
    }

    /// The default walled arena: perimeter walls, a breakable mid-line, one
    /// slowing pool, one lethal pit and three bonus sites.
    fn arena() -> Self {
        let (hw, hh) = (HALF_W as f32, HALF_H as f32);
        let t = WALL_THICKNESS;

        let walls = vec![
            WallSpec {
                pos: Vec2::new(0.0, hh + t * 0.5),
                size: Vec2::new(hw * 2.0 + t * 2.0, t),
            },
            WallSpec {
                pos: Vec2::new(0.0, -hh - t * 0.5),
                size: Vec2::new(hw * 2.0 + t * 2.0, t),
            },
            WallSpec {
                pos: Vec2::new(-hw - t * 0.5, 0.0),
                size: Vec2::new(t, hh * 2.0),
            },
            WallSpec {
                pos: Vec2::new(hw + t * 0.5, 0.0),
                size: Vec2::new(t, hh * 2.0),
            },
        ];

        let breakables = (-3..=3)
            .map(|i| BlockSpec {
                pos: Vec2::new(i as f32 * 96.0, 40.0),
                size: Vec2::splat(48.0),
                durability: 6,
            })
            .collect();

        let areas = vec![
            AreaSpec {
                pos: Vec2::new(-320.0, -180.0),
                shape: Shape::circle(140.0),
                effect: AreaEffect::slowing(0.75),
            },
            AreaSpec {
                pos: Vec2::new(380.0, -260.0),
                shape: Shape::rect(160.0, 120.0),
                effect: AreaEffect::Lethal,
            },
        ];

        Self {
            player_start: Vec2::new(0.0, -220.0),
            walls,
            breakables,
            areas,
            bonus_sites: vec![
                Vec2::new(-420.0, 220.0),
                Vec2::new(420.0, 220.0),
                Vec2::new(0.0, 320.0),
            ],
        }
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self::arena()
    }
}

pub fn plugin(app: &mut App) {
    // An embedding scene may have inserted its own level already.
    if !app.world().contains_resource::<LevelSpec>() {
        app.insert_resource(LevelSpec::default().validated());
    }
    app.add_systems(OnEnter(GameState::InGame), spawn_level);
}

pub fn spawn_level(mut commands: Commands, level: Res<LevelSpec>) {
    debug!(
        "spawning level: {} walls, {} breakables, {} areas",
        level.walls.len(),
        level.breakables.len(),
        level.areas.len()
    );

    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let block_color = Color::srgb(0.55, 0.4, 0.25);

    for (i, wall) in level.walls.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Wall{i}")),
            Kind::SolidBlock,
            Hitbox(Shape::rect(wall.size.x, wall.size.y)),
            LifeState::default(),
            Sprite { color: wall_color, custom_size: Some(wall.size), ..default() },
            Transform::from_translation(wall.pos.extend(0.5)),
            DespawnOnExit(GameState::InGame),
        ));
    }

    for (i, block) in level.breakables.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Breakable{i}")),
            Kind::BreakableBlock,
            Durability::new(block.durability),
            Hitbox(Shape::rect(block.size.x, block.size.y)),
            LifeState::default(),
            Sprite { color: block_color, custom_size: Some(block.size), ..default() },
            Transform::from_translation(block.pos.extend(0.5)),
            DespawnOnExit(GameState::InGame),
        ));
    }

    for (i, area) in level.areas.iter().enumerate() {
        let color = match area.effect {
            AreaEffect::Slowing { .. } => Color::srgba(0.3, 0.5, 0.9, 0.35),
            AreaEffect::Lethal => Color::srgba(0.9, 0.2, 0.2, 0.35),
        };
        let size = match area.shape {
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Rect { width, height } => Vec2::new(width, height),
        };
        // Areas are zones, not collidables: no Kind, no LifeState.
        commands.spawn((
            Name::new(format!("Area{i}")),
            Area { effect: area.effect },
            Hitbox(area.shape),
            Sprite { color, custom_size: Some(size), ..default() },
            Transform::from_translation(area.pos.extend(0.2)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}
