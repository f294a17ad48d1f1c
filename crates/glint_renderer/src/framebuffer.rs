//! Shared RGBA8 output buffer.
//!
//! Pixels are packed into `AtomicU32`s so bands can be written from many
//! threads while a presenter reads the buffer. A read taken mid-pass may mix
//! finished and unfinished rows; that tearing is accepted. Once
//! [`Framebuffer::is_complete`] returns true every pixel of the pass is
//! visible to the reader.

use std::path::Path;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use image::{ImageResult, RgbaImage};

/// A `width` x `height` grid of RGBA8 pixels, row 0 at the top.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<AtomicU32>,
    bands_total: AtomicUsize,
    bands_completed: AtomicUsize,
}

impl Framebuffer {
    /// Create a buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        let black = u32::from_le_bytes([0, 0, 0, 255]);
        Self {
            width,
            height,
            pixels: (0..count).map(|_| AtomicU32::new(black)).collect(),
            bands_total: AtomicUsize::new(0),
            bands_completed: AtomicUsize::new(0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Write one pixel.
    #[inline]
    pub fn set(&self, x: u32, y: u32, rgba: [u8; 4]) {
        self.pixels[self.index(x, y)].store(u32::from_le_bytes(rgba), Ordering::Relaxed);
    }

    /// Read one pixel.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)].load(Ordering::Relaxed).to_le_bytes()
    }

    /// Reset the completion counter for a pass of `total_bands` bands.
    ///
    /// Pixels from the previous pass are left in place and overwritten as
    /// the new pass progresses.
    pub fn begin_pass(&self, total_bands: usize) {
        self.bands_completed.store(0, Ordering::Relaxed);
        self.bands_total.store(total_bands, Ordering::Release);
    }

    /// Publish that one band's pixels are written.
    pub fn finish_band(&self) {
        self.bands_completed.fetch_add(1, Ordering::Release);
    }

    pub fn bands_completed(&self) -> usize {
        self.bands_completed.load(Ordering::Acquire)
    }

    pub fn bands_total(&self) -> usize {
        self.bands_total.load(Ordering::Acquire)
    }

    /// True once every band of the current pass has finished.
    pub fn is_complete(&self) -> bool {
        let total = self.bands_total();
        total > 0 && self.bands_completed() >= total
    }

    /// Snapshot as packed RGBA bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.load(Ordering::Relaxed).to_le_bytes());
        }
        bytes
    }

    /// Snapshot as an `image` buffer.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.get(x, y)))
    }

    /// Save a snapshot; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_black() {
        let fb = Framebuffer::new(3, 2);
        assert_eq!(fb.get(2, 1), [0, 0, 0, 255]);
        assert_eq!(fb.to_rgba_bytes().len(), 3 * 2 * 4);
    }

    #[test]
    fn test_set_get_row_major() {
        let fb = Framebuffer::new(3, 2);
        fb.set(1, 1, [10, 20, 30, 255]);

        assert_eq!(fb.get(1, 1), [10, 20, 30, 255]);
        let bytes = fb.to_rgba_bytes();
        let offset = (1 * 3 + 1) * 4;
        assert_eq!(&bytes[offset..offset + 4], &[10, 20, 30, 255]);
        assert_eq!(fb.to_image().get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_completion_counter() {
        let fb = Framebuffer::new(1, 1);
        assert!(!fb.is_complete());

        fb.begin_pass(2);
        fb.finish_band();
        assert_eq!(fb.bands_completed(), 1);
        assert!(!fb.is_complete());

        fb.finish_band();
        assert!(fb.is_complete());

        fb.begin_pass(2);
        assert!(!fb.is_complete());
    }

    #[test]
    fn test_concurrent_disjoint_rows() {
        let fb = Framebuffer::new(16, 8);
        std::thread::scope(|s| {
            for y in 0..8u32 {
                let fb = &fb;
                s.spawn(move || {
                    for x in 0..16 {
                        fb.set(x, y, [x as u8, y as u8, 0, 255]);
                    }
                });
            }
        });
        assert_eq!(fb.get(15, 7), [15, 7, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let path = std::env::temp_dir().join(format!("glint_fb_{}.png", std::process::id()));
        let fb = Framebuffer::new(4, 4);
        fb.set(0, 0, [255, 0, 0, 255]);
        fb.save(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        std::fs::remove_file(&path).ok();
    }
}
