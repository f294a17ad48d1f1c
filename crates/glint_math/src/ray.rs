use crate::{DVec3, VectorExt};

/// A half-line `origin + t * direction`, `t >= 0`.
///
/// The direction is normalized on construction, so the ray parameter of a
/// hit is also its Euclidean distance from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray. `direction` need not be unit length.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.safe_normalize(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, -5.0));

        assert_eq!(ray.origin, DVec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert!((ray.at(0.0) - DVec3::ZERO).length() < 1e-9);
        assert!((ray.at(2.0) - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
        assert!((ray.at(-1.0) - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_direction_does_not_produce_nan() {
        let ray = Ray::new(DVec3::ONE, DVec3::ZERO);
        assert!(ray.direction.is_finite());
    }
}
