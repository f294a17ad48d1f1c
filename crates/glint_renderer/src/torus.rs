//! Torus primitive, intersected by marching its signed distance field.
//!
//! There is no closed-form root here. The ray is sampled from its origin
//! and the first sample within [`SURFACE_EPSILON`] of the surface is the
//! hit. Thin cross-sections can be missed and every miss pays the full
//! march.

use crate::{
    hittable::{Intersection, SceneObject},
    Material, Ray, TorusMarch,
};
use glint_math::{DVec3, Interval, VectorExt};

/// Parametric range the march step is derived from.
const MARCH_RANGE: Interval = Interval::new(0.0, 100.0);

/// Number of samples taken by the fixed march.
const MAX_STEPS: usize = 10_000;

/// Absolute SDF tolerance for accepting a sample as a hit.
const SURFACE_EPSILON: f64 = 1e-2;

/// Central-difference step for the normal.
const NORMAL_DELTA: f64 = 1e-4;

/// A torus lying in the XZ plane around `center`.
#[derive(Debug, Clone, Copy)]
pub struct Torus {
    center: DVec3,
    /// Distance from the center to the middle of the tube
    major_radius: f64,
    /// Radius of the tube
    minor_radius: f64,
    material: Material,
    march: TorusMarch,
}

impl Torus {
    /// Create a torus marched with [`TorusMarch::default`].
    pub fn new(center: DVec3, major_radius: f64, minor_radius: f64, material: Material) -> Self {
        Self {
            center,
            major_radius,
            minor_radius,
            material,
            march: TorusMarch::default(),
        }
    }

    /// Choose the marching strategy.
    pub fn with_march(mut self, march: TorusMarch) -> Self {
        self.march = march;
        self
    }

    /// Signed distance from `p` to the surface (negative inside the tube).
    pub fn distance(&self, p: DVec3) -> f64 {
        let p = p - self.center;
        let xz = (p.x * p.x + p.z * p.z).sqrt();
        let ring = xz - self.major_radius;
        (ring * ring + p.y * p.y).sqrt() - self.minor_radius
    }

    /// Fixed step, advanced by half a step per sample.
    fn march_fixed(&self, ray: &Ray) -> Option<f64> {
        let step = MARCH_RANGE.size() / MAX_STEPS as f64;
        let mut t = MARCH_RANGE.min;

        for _ in 0..MAX_STEPS {
            if self.distance(ray.at(t)).abs() < SURFACE_EPSILON {
                return Some(t);
            }
            t += step * 0.5;
        }

        None
    }

    /// Sphere tracing over the same reach as the fixed march.
    ///
    /// The SDF is an exact Euclidean distance, so stepping by its magnitude
    /// never crosses the surface.
    fn march_sphere_trace(&self, ray: &Ray) -> Option<f64> {
        let reach = MARCH_RANGE.min + MARCH_RANGE.size() * 0.5;
        let mut t = MARCH_RANGE.min;

        for _ in 0..MAX_STEPS {
            if t >= reach {
                break;
            }
            let d = self.distance(ray.at(t));
            if d.abs() < SURFACE_EPSILON {
                return Some(t);
            }
            t += d.abs();
        }

        None
    }
}

impl SceneObject for Torus {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let t = match self.march {
            TorusMarch::Fixed => self.march_fixed(ray),
            TorusMarch::SphereTrace => self.march_sphere_trace(ray),
        }?;

        // A ray starting on the surface reports t = 0, which is not a hit
        Intersection::at(ray, t, self)
    }

    fn normal_at(&self, p: DVec3) -> DVec3 {
        let dx = DVec3::new(NORMAL_DELTA, 0.0, 0.0);
        let dy = DVec3::new(0.0, NORMAL_DELTA, 0.0);
        let dz = DVec3::new(0.0, 0.0, NORMAL_DELTA);

        DVec3::new(
            self.distance(p + dx) - self.distance(p - dx),
            self.distance(p + dy) - self.distance(p - dy),
            self.distance(p + dz) - self.distance(p - dz),
        )
        .safe_normalize()
    }

    fn material_at(&self, _point: DVec3) -> Material {
        self.material
    }
}
