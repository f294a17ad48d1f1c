//! SceneObject trait, Intersection and the nearest-hit scene query.

use std::fmt;

use crate::{Material, Ray};
use glint_math::{DVec3, Interval};

/// A ray-object hit at a strictly positive ray parameter.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: DVec3,
    /// Ray parameter of the hit (Euclidean distance, as rays are unit length)
    pub distance: f64,
    /// The object that was hit
    pub object: &'a dyn SceneObject,
}

impl<'a> Intersection<'a> {
    /// Build a hit at parameter `t` along `ray`, or `None` unless `t > 0`.
    pub fn at(ray: &Ray, t: f64, object: &'a dyn SceneObject) -> Option<Self> {
        if !Interval::POSITIVE.surrounds(t) {
            return None;
        }
        Some(Self {
            point: ray.at(t),
            distance: t,
            object,
        })
    }
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("point", &self.point)
            .field("distance", &self.distance)
            .finish_non_exhaustive()
    }
}

/// A solid that rays can hit.
///
/// Objects are immutable during rendering and shared between worker threads.
pub trait SceneObject: Send + Sync {
    /// Nearest hit of `ray` with this object, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>>;

    /// Surface normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;

    /// Material at a point on the surface.
    fn material_at(&self, point: DVec3) -> Material;
}

/// Find the nearest hit with a strictly positive distance among `objects`.
///
/// Linear in the number of objects.
pub fn cast<'a>(ray: &Ray, objects: &'a [Box<dyn SceneObject>]) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;

    for object in objects {
        if let Some(hit) = object.intersect(ray) {
            if !Interval::POSITIVE.surrounds(hit.distance) {
                continue;
            }
            if closest.map_or(true, |c| hit.distance < c.distance) {
                closest = Some(hit);
            }
        }
    }

    closest
}

/// The scene's ordered list of objects.
#[derive(Default)]
pub struct ObjectList {
    objects: Vec<Box<dyn SceneObject>>,
}

impl ObjectList {
    /// Create a new empty object list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn SceneObject>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest positive-distance hit in the list.
    pub fn cast(&self, ray: &Ray) -> Option<Intersection<'_>> {
        cast(ray, &self.objects)
    }
}

impl FromIterator<Box<dyn SceneObject>> for ObjectList {
    fn from_iter<I: IntoIterator<Item = Box<dyn SceneObject>>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    fn sphere_at(z: f64, radius: f64) -> Box<dyn SceneObject> {
        Box::new(Sphere::new(DVec3::new(0.0, 0.0, z), radius, Material::default()))
    }

    #[test]
    fn test_cast_picks_nearest() {
        let mut list = ObjectList::new();
        list.add(sphere_at(-20.0, 1.0));
        list.add(sphere_at(-5.0, 1.0));
        list.add(sphere_at(-10.0, 1.0));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let hit = list.cast(&ray).expect("should hit");
        assert!((hit.distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_cast_miss() {
        let list: ObjectList = vec![sphere_at(-5.0, 1.0)].into_iter().collect();
        assert_eq!(list.len(), 1);

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0));
        assert!(list.cast(&ray).is_none());
    }

    #[test]
    fn test_cast_empty_list() {
        let list = ObjectList::new();
        assert!(list.is_empty());

        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        assert!(list.cast(&ray).is_none());
    }

    #[test]
    fn test_intersection_at_rejects_non_positive() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0, Material::default());
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert!(Intersection::at(&ray, 0.0, &sphere).is_none());
        assert!(Intersection::at(&ray, -1.0, &sphere).is_none());
        assert!(Intersection::at(&ray, 0.5, &sphere).is_some());
    }
}
