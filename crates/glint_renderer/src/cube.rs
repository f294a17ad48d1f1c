//! Axis-aligned cube primitive.

use crate::{
    hittable::{Intersection, SceneObject},
    Material, Ray,
};
use glint_math::{Aabb, DVec3};

/// Distance within which a point counts as lying on a face plane.
const FACE_EPSILON: f64 = 1e-4;

/// An axis-aligned cube.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    bounds: Aabb,
    material: Material,
}

impl Cube {
    /// Create a cube of edge length `size` centered on `center`.
    pub fn new(center: DVec3, size: f64, material: Material) -> Self {
        Self {
            bounds: Aabb::from_center_size(center, size),
            material,
        }
    }

    /// The cube's extent.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl SceneObject for Cube {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let t = self.bounds.slab_interval(ray)?;

        // Entry point, or the exit point when starting inside
        let distance = if t.min > 0.0 {
            t.min
        } else if t.max > 0.0 {
            t.max
        } else {
            return None;
        };

        Intersection::at(ray, distance, self)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        let min = self.bounds.min();
        let max = self.bounds.max();

        if (point.x - min.x).abs() < FACE_EPSILON {
            -DVec3::X
        } else if (point.x - max.x).abs() < FACE_EPSILON {
            DVec3::X
        } else if (point.y - min.y).abs() < FACE_EPSILON {
            -DVec3::Y
        } else if (point.y - max.y).abs() < FACE_EPSILON {
            DVec3::Y
        } else if (point.z - min.z).abs() < FACE_EPSILON {
            -DVec3::Z
        } else {
            DVec3::Z
        }
    }

    fn material_at(&self, _point: DVec3) -> Material {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: [DVec3; 6] = [
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];

    fn on_boundary(cube: &Cube, p: DVec3) -> bool {
        let (min, max) = (cube.bounds().min(), cube.bounds().max());
        (0..3).any(|i| (p[i] - min[i]).abs() < 1e-6 || (p[i] - max[i]).abs() < 1e-6)
    }

    #[test]
    fn test_cube_hit_from_each_side() {
        let center = DVec3::new(-7.0, 2.0, -10.0);
        let cube = Cube::new(center, 2.0, Material::default());

        for axis in AXES {
            let origin = center + axis * 10.0;
            let ray = Ray::new(origin, center - origin);

            let hit = cube.intersect(&ray).expect("ray aimed at center should hit");
            assert!((hit.distance - 9.0).abs() < 1e-6);
            assert!(on_boundary(&cube, hit.point));

            let normal = cube.normal_at(hit.point);
            assert!(AXES.contains(&normal));
            assert_eq!(normal, axis);
        }
    }

    #[test]
    fn test_cube_hit_from_inside_uses_exit() {
        let cube = Cube::new(DVec3::ZERO, 2.0, Material::default());
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0));

        let hit = cube.intersect(&ray).expect("should hit exit face");
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert_eq!(cube.normal_at(hit.point), DVec3::Y);
    }

    #[test]
    fn test_cube_behind_and_beside() {
        let cube = Cube::new(DVec3::new(0.0, 0.0, -5.0), 2.0, Material::default());

        let behind = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(cube.intersect(&behind).is_none());

        let beside = Ray::new(DVec3::new(3.0, 0.0, 0.0), DVec3::NEG_Z);
        assert!(cube.intersect(&beside).is_none());
    }
}
