//! Texture loading for environment maps.
//!
//! Images are decoded with the `image` crate and kept as normalized RGB
//! floats. No color-space conversion is applied: the tracer writes its
//! output without gamma, so the environment is kept in the same encoding.

use std::path::Path;

use glint_math::DVec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),

    #[error("Pixel buffer of {actual} bytes does not match {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// RGB in [0, 1], row-major, row 0 at the top of the image
    pub pixels: Vec<DVec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from 8-bit RGB data (3 bytes per pixel, row-major).
    pub fn from_rgb8(width: u32, height: u32, data: &[u8], path: impl Into<String>) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }
        if data.len() != (width as usize) * (height as usize) * 3 {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(3)
            .map(|p| {
                DVec3::new(
                    p[0] as f64 / 255.0,
                    p[1] as f64 / 255.0,
                    p[2] as f64 / 255.0,
                )
            })
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Get the pixel at integer coordinates, clamped to the image bounds.
    pub fn pixel(&self, x: i64, y: i64) -> DVec3 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<DVec3>()
    }
}

/// Load a texture from a file path (any format the `image` crate decodes).
pub fn load_texture_file(path: impl AsRef<Path>) -> TextureResult<Texture> {
    let path = path.as_ref();
    let display = path.to_string_lossy().to_string();

    let img = image::open(path).map_err(|source| TextureError::Load {
        path: display.clone(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let texture = Texture::from_rgb8(width, height, rgb.as_raw(), display)?;

    log::debug!(
        "Loaded texture: {} ({}x{}, {:.1} KB)",
        texture.path,
        texture.width,
        texture.height,
        texture.size_bytes() as f32 / 1024.0
    );

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8_normalizes() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 51, 102, 153];
        let tex = Texture::from_rgb8(2, 2, &data, "mem").unwrap();

        assert_eq!(tex.pixel(0, 0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.pixel(1, 0), DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.pixel(0, 1), DVec3::new(0.0, 0.0, 1.0));
        assert!((tex.pixel(1, 1) - DVec3::new(0.2, 0.4, 0.6)).length() < 1e-9);

        // Out of range coordinates clamp to the nearest edge pixel
        assert_eq!(tex.pixel(-3, 7), tex.pixel(0, 1));
        assert_eq!(tex.pixel(9, -1), tex.pixel(1, 0));
    }

    #[test]
    fn test_from_rgb8_rejects_bad_sizes() {
        assert!(matches!(
            Texture::from_rgb8(0, 4, &[], "empty"),
            Err(TextureError::Empty(_))
        ));
        assert!(matches!(
            Texture::from_rgb8(2, 2, &[0; 5], "short"),
            Err(TextureError::SizeMismatch { actual: 5, .. })
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_texture_file("definitely/not/here/sky.jpeg");
        assert!(matches!(result, Err(TextureError::Load { .. })));
    }

    #[test]
    fn test_load_png_roundtrip_through_disk() {
        let path = std::env::temp_dir().join(format!("glint_texture_{}.png", std::process::id()));
        let img = image::RgbImage::from_fn(4, 2, |x, y| image::Rgb([(x * 60) as u8, (y * 200) as u8, 10]));
        img.save(&path).unwrap();

        let tex = load_texture_file(&path).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert!((tex.pixel(3, 1).x - 180.0 / 255.0).abs() < 1e-9);
        assert!((tex.pixel(3, 1).y - 200.0 / 255.0).abs() < 1e-9);

        std::fs::remove_file(&path).ok();
    }
}
