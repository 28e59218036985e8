//! Shape-approximate bounds: circles and axis-aligned rectangles.
//!
//! Pure geometry, no ECS types beyond `Vec2`. Everything that touches the
//! world goes through [`Bounds`], a shape anchored at a center point; movement
//! probes are by-value copies repositioned with [`Bounds::at`], so the
//! original is never mutated until a move is committed.
//!
//! Comparison semantics are deliberately uneven and must stay that way:
//! circle-involved tests treat touching as intersecting (non-strict), while
//! rect/rect is strict on both axes so rectangles resting edge-to-edge do
//! *not* collide. Wall sliding depends on the strict case.

use bevy::math::Vec2;

/// A collision shape. Dimensions are validated at construction; a zero or
/// negative extent is a configuration error, not a runtime condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        assert!(radius > 0.0, "circle radius must be positive, got {radius}");
        Self::Circle { radius }
    }

    pub fn rect(width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "rect dimensions must be positive, got {width}x{height}"
        );
        Self::Rect { width, height }
    }

    /// Uniformly rescale, re-validating the result.
    pub fn rescaled(self, factor: f32) -> Self {
        assert!(factor > 0.0, "rescale factor must be positive, got {factor}");
        match self {
            Self::Circle { radius } => Self::circle(radius * factor),
            Self::Rect { width, height } => Self::rect(width * factor, height * factor),
        }
    }

    /// Largest span of the shape: diameter for circles, diagonal for rects.
    /// Used for spawn-offset math (placing a bullet clear of its owner).
    pub fn max_extent(self) -> f32 {
        match self {
            Self::Circle { radius } => radius * 2.0,
            Self::Rect { width, height } => (width * width + height * height).sqrt(),
        }
    }

    fn half_extents(self) -> Vec2 {
        match self {
            Self::Circle { radius } => Vec2::splat(radius),
            Self::Rect { width, height } => Vec2::new(width * 0.5, height * 0.5),
        }
    }
}

/// A [`Shape`] anchored at a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub shape: Shape,
}

impl Bounds {
    pub fn new(center: Vec2, shape: Shape) -> Self {
        Self { center, shape }
    }

    /// The same shape repositioned: this is the probe constructor.
    pub fn at(self, center: Vec2) -> Self {
        Self { center, ..self }
    }

    pub fn min_x(&self) -> f32 {
        self.center.x - self.shape.half_extents().x
    }

    pub fn max_x(&self) -> f32 {
        self.center.x + self.shape.half_extents().x
    }

    pub fn min_y(&self) -> f32 {
        self.center.y - self.shape.half_extents().y
    }

    pub fn max_y(&self) -> f32 {
        self.center.y + self.shape.half_extents().y
    }

    /// Overlap test. Touching counts as intersecting for every pairing except
    /// rect/rect, which is strict on both axes.
    pub fn intersects(&self, other: &Bounds) -> bool {
        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                let reach = ra + rb;
                self.center.distance_squared(other.center) <= reach * reach
            }
            (Shape::Rect { width: wa, height: ha }, Shape::Rect { width: wb, height: hb }) => {
                let d = (self.center - other.center).abs();
                d.x < (wa + wb) * 0.5 && d.y < (ha + hb) * 0.5
            }
            (Shape::Circle { radius }, Shape::Rect { .. }) => {
                circle_hits_rect(self.center, radius, other)
            }
            // The symmetric case delegates so the clamp math lives in one place.
            (Shape::Rect { .. }, Shape::Circle { .. }) => other.intersects(self),
        }
    }

    /// Full containment: true only when `other` lies entirely within `self`.
    /// Defined for every shape pairing; never errors.
    pub fn contains(&self, other: &Bounds) -> bool {
        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                rb <= ra && self.center.distance(other.center) + rb <= ra
            }
            (Shape::Circle { radius }, Shape::Rect { .. }) => {
                // A rect fits in a circle iff all four corners do.
                let r2 = radius * radius;
                [
                    Vec2::new(other.min_x(), other.min_y()),
                    Vec2::new(other.min_x(), other.max_y()),
                    Vec2::new(other.max_x(), other.min_y()),
                    Vec2::new(other.max_x(), other.max_y()),
                ]
                .into_iter()
                .all(|corner| self.center.distance_squared(corner) <= r2)
            }
            // Anything fits in a rect iff its axis extents do.
            (Shape::Rect { .. }, _) => {
                other.min_x() >= self.min_x()
                    && other.max_x() <= self.max_x()
                    && other.min_y() >= self.min_y()
                    && other.max_y() <= self.max_y()
            }
        }
    }
}

/// Closest-point test: clamp the circle center to the rect extents, then
/// compare that point's distance against the radius (non-strict).
fn circle_hits_rect(center: Vec2, radius: f32, rect: &Bounds) -> bool {
    let closest = center.clamp(
        Vec2::new(rect.min_x(), rect.min_y()),
        Vec2::new(rect.max_x(), rect.max_y()),
    );
    closest.distance_squared(center) <= radius * radius
}
