//! Tetrahedron primitive built from four triangular faces.

use crate::{
    hittable::{Intersection, SceneObject},
    Material, Ray,
};
use glint_math::{DMat4, DVec3, Interval, VectorExt};

/// Vertex indices of each face. Face orientation follows this winding.
const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// Below this |d . n| a ray is treated as parallel to a face.
const PARALLEL_EPSILON: f64 = 1e-6;

/// A tetrahedron.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    vertices: [DVec3; 4],
    material: Material,
}

impl Tetrahedron {
    /// Create a new tetrahedron from four vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3, v3: DVec3, material: Material) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
            material,
        }
    }

    /// Transform the vertices in place. Meant for scene construction only.
    pub fn apply_transform(&mut self, transform: &DMat4) {
        for v in &mut self.vertices {
            *v = transform.transform_point3(*v);
        }
    }

    /// Current vertex positions.
    pub fn vertices(&self) -> [DVec3; 4] {
        self.vertices
    }

    fn face(&self, index: usize) -> (DVec3, DVec3, DVec3) {
        let [a, b, c] = FACES[index];
        (self.vertices[a], self.vertices[b], self.vertices[c])
    }

    fn face_normal(v0: DVec3, v1: DVec3, v2: DVec3) -> DVec3 {
        (v1 - v0).cross(v2 - v0).safe_normalize()
    }
}

/// Barycentric containment test for a point already on the triangle's plane.
fn point_in_triangle(p: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let edge0 = v1 - v0;
    let edge1 = v2 - v0;
    let edge2 = p - v0;

    let d00 = edge0.dot(edge0);
    let d01 = edge0.dot(edge1);
    let d11 = edge1.dot(edge1);
    let d20 = edge2.dot(edge0);
    let d21 = edge2.dot(edge1);

    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 {
        return false;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    u >= 0.0 && v >= 0.0 && w >= 0.0
}

impl SceneObject for Tetrahedron {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let mut closest: Option<f64> = None;

        for index in 0..FACES.len() {
            let (v0, v1, v2) = self.face(index);
            let normal = Self::face_normal(v0, v1, v2);

            let denominator = ray.direction.dot(normal);
            if denominator.abs() < PARALLEL_EPSILON {
                continue;
            }

            let t = (v0 - ray.origin).dot(normal) / denominator;
            if !Interval::POSITIVE.surrounds(t) {
                continue;
            }

            if point_in_triangle(ray.at(t), v0, v1, v2) && closest.map_or(true, |c| t < c) {
                closest = Some(t);
            }
        }

        Intersection::at(ray, closest?, self)
    }

    /// Normal of the face whose plane lies nearest to `point`.
    fn normal_at(&self, point: DVec3) -> DVec3 {
        let mut best = DVec3::Y;
        let mut min_dist = f64::MAX;

        for index in 0..FACES.len() {
            let (v0, v1, v2) = self.face(index);
            let normal = Self::face_normal(v0, v1, v2);
            let dist = normal.dot(point - v0).abs();
            if dist < min_dist {
                min_dist = dist;
                best = normal;
            }
        }

        best
    }

    fn material_at(&self, _point: DVec3) -> Material {
        self.material
    }
}
