//! Firing patterns.
//!
//! A pattern is a closed enum, swapped at runtime by weapon bonuses and
//! dispatched with a match. Each variant owns the full `BulletSpec` needed to
//! build its bullets, so swapping patterns never touches ammunition or the
//! reload timer.

use std::f32::consts::TAU;

/// Everything needed to build one bullet. Validated up front; a pattern
/// holding a `BulletSpec` can always fire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSpec {
    pub damage: i32,
    pub speed: f32,
    pub lifetime_secs: f32,
    pub radius: f32,
}

impl BulletSpec {
    pub fn new(damage: i32, speed: f32, lifetime_secs: f32, radius: f32) -> Self {
        assert!(damage > 0, "bullet damage must be positive, got {damage}");
        assert!(speed > 0.0, "bullet speed must be positive, got {speed}");
        assert!(lifetime_secs > 0.0, "bullet lifetime must be positive, got {lifetime_secs}");
        assert!(radius > 0.0, "bullet radius must be positive, got {radius}");
        Self { damage, speed, lifetime_secs, radius }
    }
}

/// One bullet a pattern wants created, at an absolute world angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub angle: f32,
    pub spec: BulletSpec,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FirePattern {
    /// One bullet along the facing.
    Single(BulletSpec),
    /// Two bullets along the facing; the stagger queue spaces them in time.
    Double(BulletSpec),
    /// `count` bullets spread evenly around the full circle.
    Circular { spec: BulletSpec, count: u32 },
}

impl FirePattern {
    pub fn circular(spec: BulletSpec, count: u32) -> Self {
        assert!(count > 0, "circular pattern needs at least one bullet, got {count}");
        Self::Circular { spec, count }
    }

    pub fn spec(&self) -> BulletSpec {
        match *self {
            Self::Single(spec) | Self::Double(spec) | Self::Circular { spec, .. } => spec,
        }
    }

    /// The bullets one trigger pull produces, given the shooter's facing.
    /// Angles are normalized to [0, TAU).
    pub fn shots(&self, facing: f32) -> Vec<Shot> {
        let facing = facing.rem_euclid(TAU);
        match *self {
            Self::Single(spec) => vec![Shot { angle: facing, spec }],
            Self::Double(spec) => vec![Shot { angle: facing, spec }; 2],
            Self::Circular { spec, count } => {
                let step = TAU / count as f32;
                (0..count)
                    .map(|i| Shot {
                        angle: (facing + i as f32 * step).rem_euclid(TAU),
                        spec,
                    })
                    .collect()
            }
        }
    }
}
