//! Sphere primitive for ray tracing.

use crate::{
    hittable::{Intersection, SceneObject},
    Material, Ray,
};
use glint_math::{DVec3, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl SceneObject for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        // Closest approach of the ray line to the center, compared to r^2
        let l = self.center - ray.origin;
        let adj = l.dot(ray.direction);
        let d2 = l.dot(l) - adj * adj;
        let radius2 = self.radius * self.radius;
        if d2 > radius2 {
            return None;
        }

        let thc = (radius2 - d2).sqrt();
        let t0 = adj - thc;
        let t1 = adj + thc;
        if t0 < 0.0 && t1 < 0.0 {
            return None;
        }

        // Entry point unless the origin is inside the sphere
        let distance = if t0 > 0.0 { t0 } else { t1 };
        Intersection::at(ray, distance, self)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).safe_normalize()
    }

    fn material_at(&self, _point: DVec3) -> Material {
        self.material
    }
}
