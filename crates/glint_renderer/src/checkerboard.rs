//! Infinite horizontal checkerboard floor.

use crate::{
    hittable::{Intersection, SceneObject},
    Material, Ray,
};
use glint_math::DVec3;

/// Pattern period in world units; each tile is half of it.
const PERIOD: f64 = 6.0;

/// A horizontal plane at height `y`, seen only by rays heading downward.
#[derive(Debug, Clone, Copy)]
pub struct Checkerboard {
    y: f64,
    even: Material,
    odd: Material,
}

impl Checkerboard {
    /// `even` covers tiles where both coordinates fall in the same half of
    /// the period; `odd` covers the rest.
    pub fn new(y: f64, even: Material, odd: Material) -> Self {
        Self { y, even, odd }
    }

    /// Position within the period, always in `[0, PERIOD)`.
    fn wrap(coord: f64) -> f64 {
        (coord.floor() % PERIOD + PERIOD) % PERIOD
    }
}

impl SceneObject for Checkerboard {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        // Looking up never meets the floor
        if ray.direction.y >= 0.0 {
            return None;
        }

        let t = (self.y - ray.origin.y) / ray.direction.y;
        Intersection::at(ray, t, self)
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        DVec3::Y
    }

    fn material_at(&self, point: DVec3) -> Material {
        let half = PERIOD / 2.0;
        let x_low = Self::wrap(point.x) < half;
        let z_low = Self::wrap(point.z) < half;

        if x_low == z_low {
            self.even
        } else {
            self.odd
        }
    }
}
