// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{safe_div, VectorExt, DIV_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, DVec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_affine_transform_composition() {
        let m = DMat4::from_translation(DVec3::new(1.0, 0.0, 0.0))
            * DMat4::from_scale(DVec3::splat(2.0));
        let p = m.transform_point3(DVec3::new(1.0, 1.0, 1.0));
        assert!((p - DVec3::new(3.0, 2.0, 2.0)).length() < 1e-12);
    }
}
