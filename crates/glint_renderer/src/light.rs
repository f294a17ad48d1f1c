//! Directional light and Phong shading terms.

use std::fmt;

use crate::{Color, Material};
use glint_core::LightDesc;
use glint_math::{DVec3, VectorExt};

/// A light infinitely far away, shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the light into the scene
    pub direction: DVec3,
    pub strength: f64,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub ambient_color: Color,
}

impl DirectionalLight {
    /// Create a new light; `direction` is normalized.
    pub fn new(
        direction: DVec3,
        strength: f64,
        diffuse_color: Color,
        specular_color: Color,
        ambient_color: Color,
    ) -> Self {
        Self {
            direction: direction.safe_normalize(),
            strength,
            diffuse_color,
            specular_color,
            ambient_color,
        }
    }

    /// Build from a scene description.
    pub fn from_desc(desc: &LightDesc) -> Self {
        Self::new(
            desc.direction,
            desc.strength,
            desc.diffuse_color,
            desc.specular_color,
            desc.ambient_color,
        )
    }

    /// Unit vector from any point toward the light.
    #[inline]
    pub fn direction_to_light(&self) -> DVec3 {
        -self.direction
    }

    /// Strength of the light; the same everywhere.
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.strength
    }

    /// Ambient term. Applied whether or not the point is lit.
    pub fn ambient(&self, material: &Material) -> Color {
        material.ambient_color * self.ambient_color
    }

    /// Diffuse plus specular terms for an unoccluded point.
    ///
    /// `view_dir` is the unit vector from the point toward the viewer.
    pub fn direct(&self, material: &Material, normal: DVec3, view_dir: DVec3) -> Color {
        let to_light = self.direction_to_light();
        let n_dot_l = normal.dot(to_light);

        let diffuse_intensity = n_dot_l.max(0.0) * self.intensity();
        let diffuse = material.diffuse_color * self.diffuse_color * diffuse_intensity;

        // to_light mirrored about the normal
        let reflect_dir = normal * (2.0 * n_dot_l) - to_light;
        let specular_intensity = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
        let specular = material.specular_color * self.specular_color * specular_intensity;

        diffuse + specular
    }

    /// Full Phong color at a surface point. Occluded points get ambient only.
    pub fn shade(&self, material: &Material, normal: DVec3, view_dir: DVec3, lit: bool) -> Color {
        let ambient = self.ambient(material);
        if lit {
            ambient + self.direct(material, normal, view_dir)
        } else {
            ambient
        }
    }
}

impl fmt::Display for DirectionalLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DirectionalLight(direction: {:.2}, strength: {:.2})",
            self.direction, self.strength
        )
    }
}
