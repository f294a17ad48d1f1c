//! Camera for primary ray generation.

use std::f64::consts::TAU;
use std::fmt;

use crate::gen_f64;
use glint_core::CameraDesc;
use glint_math::{safe_div, DVec3, Ray, VectorExt};
use rand::RngCore;

/// Pinhole camera looking down -Z, with optional thin-lens depth of field.
///
/// Screen coordinates have their origin at the bottom-left corner of the
/// image, so `y` grows upward like world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    width: u32,
    height: u32,
    fov_degrees: f64,
    focus_distance: f64,
    aperture: f64,
}

impl Camera {
    /// Create a camera for a `width` x `height` screen.
    pub fn new(
        position: DVec3,
        width: u32,
        height: u32,
        fov_degrees: f64,
        focus_distance: f64,
        aperture: f64,
    ) -> Self {
        Self {
            position,
            width,
            height,
            fov_degrees,
            focus_distance,
            aperture,
        }
    }

    /// Build from a scene description at the given resolution.
    pub fn from_desc(desc: &CameraDesc, width: u32, height: u32) -> Self {
        Self::new(
            desc.position,
            width,
            height,
            desc.fov_degrees,
            desc.focus_distance,
            desc.aperture,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    /// Distance from the eye to the virtual image plane, in pixels.
    fn image_plane_distance(&self) -> f64 {
        let half_height = self.height as f64 / 2.0;
        safe_div(half_height, (self.fov_degrees.to_radians() / 2.0).tan())
    }

    /// Unjittered unit direction through screen point (x, y).
    pub fn direction_for(&self, x: f64, y: f64) -> DVec3 {
        let z = self.image_plane_distance();
        DVec3::new(
            x - self.width as f64 / 2.0,
            y - self.height as f64 / 2.0,
            -z,
        )
        .safe_normalize()
    }

    /// Primary ray through screen point (x, y).
    ///
    /// With a positive aperture the origin is jittered across the lens disk
    /// and the ray re-aimed at the point `focus_distance` along the
    /// unjittered direction, so only that distance stays sharp.
    pub fn ray_for(&self, x: f64, y: f64, rng: &mut dyn RngCore) -> Ray {
        let direction = self.direction_for(x, y);
        if self.aperture <= 0.0 {
            return Ray::new(self.position, direction);
        }

        let lens_offset = self.lens_sample(rng);
        let focal_point = self.position + direction * self.focus_distance;
        let origin = self.position + lens_offset;
        Ray::new(origin, focal_point - origin)
    }

    /// Uniform point on the lens disk of radius `aperture / 2`, in the XY plane.
    fn lens_sample(&self, rng: &mut dyn RngCore) -> DVec3 {
        let theta = gen_f64(rng) * TAU;
        let r = self.aperture / 2.0 * gen_f64(rng).sqrt();
        DVec3::new(r * theta.cos(), r * theta.sin(), 0.0)
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera(position: {:.2}, screen: {}x{}, fov: {:.1}, focus_distance: {:.1}, aperture: {:.2})",
            self.position, self.width, self.height, self.fov_degrees, self.focus_distance, self.aperture
        )
    }
}
