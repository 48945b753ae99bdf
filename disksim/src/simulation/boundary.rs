//! Window-edge reflection and circle obstacles

use crate::simulation::states::{Body, NVec2};

/// Keep a disk inside `[0, width] x [0, height]`.
///
/// A disk whose edge crossed a wall is clamped back onto it and the velocity
/// component along that axis is negated and scaled by `restitution`
/// (1.0 keeps the speed). Returns true if any wall was hit.
pub fn reflect_in_bounds(b: &mut Body, width: f64, height: f64, restitution: f64) -> bool {
    let r = b.radius;
    let mut hit = false;

    if b.x.x < r {
        b.x.x = r;
        b.v.x *= -restitution;
        hit = true;
    } else if b.x.x > width - r {
        b.x.x = width - r;
        b.v.x *= -restitution;
        hit = true;
    }

    if b.x.y < r {
        b.x.y = r;
        b.v.y *= -restitution;
        hit = true;
    } else if b.x.y > height - r {
        b.x.y = height - r;
        b.v.y *= -restitution;
        hit = true;
    }

    hit
}

/// Static circle that bounces disks back with damping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleObstacle {
    pub center: NVec2,
    pub radius: f64,
    pub restitution: f64, // 0.8 by default
}

impl CircleObstacle {
    pub fn new(center: NVec2, radius: f64) -> Self {
        Self {
            center,
            radius,
            restitution: 0.8,
        }
    }

    pub fn overlaps(&self, b: &Body) -> bool {
        (b.x - self.center).norm() < self.radius + b.radius
    }

    /// v = -restitution * v for a disk that overlaps the obstacle while still
    /// moving into it. No positional correction.
    pub fn resolve(&self, b: &mut Body) -> bool {
        if !self.overlaps(b) {
            return false;
        }
        let outward = b.x - self.center;
        if b.v.dot(&outward) >= 0.0 {
            return false; // already leaving
        }
        b.v *= -self.restitution;
        true
    }
}
