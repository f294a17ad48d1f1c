//! Background colors for rays that escape the scene.

use std::f64::consts::{PI, TAU};
use std::path::Path;

use crate::Color;
use glint_core::{load_texture_file, Texture, TextureResult};
use glint_math::DVec3;

/// What a ray sees when it hits nothing.
pub trait Environment: Send + Sync {
    /// Color seen along a unit direction.
    fn sample(&self, direction: DVec3) -> Color;
}

/// Equirectangular environment image.
#[derive(Clone, Debug)]
pub struct Skybox {
    texture: Texture,
}

impl Skybox {
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }

    /// Decode an image file (JPEG, PNG, ...) into a skybox.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let texture = load_texture_file(path)?;
        log::info!(
            "Loaded skybox {} ({}x{})",
            texture.path,
            texture.width,
            texture.height
        );
        Ok(Self::new(texture))
    }

    /// Map a unit direction to equirectangular (u, v), both in [0, 1].
    ///
    /// `v = 1` is straight up.
    pub fn image_coords(direction: DVec3) -> (f64, f64) {
        let u = 0.5 + direction.z.atan2(direction.x) / TAU;
        let v = 0.5 + direction.y.clamp(-1.0, 1.0).asin() / PI;
        (u, v)
    }
}

impl Environment for Skybox {
    fn sample(&self, direction: DVec3) -> Color {
        let (u, v) = Self::image_coords(direction);

        // Image row 0 is the top, hence 1 - v
        let x = (u * self.texture.width as f64) as i64;
        let y = ((1.0 - v) * self.texture.height as f64) as i64;
        self.texture.pixel(x, y)
    }
}

/// A constant background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor(pub Color);

impl Environment for SolidColor {
    fn sample(&self, _direction: DVec3) -> Color {
        self.0
    }
}
