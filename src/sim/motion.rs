//! Kinematics and wall collision for axis-aligned boxes
//!
//! Words and floaters are boxes anchored at their top-left corner that drift
//! inside a rectangular field. Wall contact clamps the box back inside and
//! forces the velocity component to point away from that wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of a rectangular field with its origin at (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left position a box of `size` can take (never negative)
    #[inline]
    pub fn max_origin(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            (self.width - size.x).max(0.0),
            (self.height - size.y).max(0.0),
        )
    }

    /// Clamp a box origin into the field
    #[inline]
    pub fn clamp(&self, pos: Vec2, size: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_origin(size))
    }

    /// Whether a box lies fully inside the field (lenient on degenerate fields)
    pub fn contains(&self, pos: Vec2, size: Vec2) -> bool {
        let max = self.max_origin(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

/// Which walls were touched during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    pub x: bool,
    pub y: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Clamp-and-reflect on one axis.
///
/// Returns true when a wall was touched. The sign is forced, not flipped,
/// so a box resting on a wall keeps pointing away from it.
#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, size: f32, extent: f32) -> bool {
    if *pos <= 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
        true
    } else if *pos + size >= extent {
        *pos = extent - size;
        *vel = -vel.abs();
        true
    } else {
        false
    }
}

/// Advance a box by `vel * dt` and resolve wall contact on each axis.
pub fn step_body(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, bounds: Bounds, dt: f32) -> WallContact {
    *pos += *vel * dt;

    let contact = WallContact {
        x: reflect_axis(&mut pos.x, &mut vel.x, size.x, bounds.width),
        y: reflect_axis(&mut pos.y, &mut vel.y, size.y, bounds.height),
    };

    // A field smaller than the box pins it at the origin
    *pos = bounds.clamp(*pos, size);
    contact
}
