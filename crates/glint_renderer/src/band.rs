//! Band-based scanline scheduling.
//!
//! The image is split into horizontal bands of whole rows. Each band is one
//! parallel task and owns its rows of the framebuffer outright.

use rand::RngCore;

use crate::renderer::{color_to_rgba, render_pixel};
use crate::{Framebuffer, RenderConfig, RenderContext};

/// A horizontal strip of full-width rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row of the band (row 0 is the top of the image)
    pub y: u32,
    /// Width of the band in pixels
    pub width: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Index of this band in top-to-bottom order
    pub index: usize,
}

impl Band {
    pub fn new(y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Rows covered by this band.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.y..self.y + self.height
    }
}

/// Default rows per band.
pub const DEFAULT_ROWS_PER_TASK: u32 = 80;

/// Split a `width` x `height` image into bands of `rows_per_task` rows.
///
/// The last band takes whatever rows remain. A zero `rows_per_task` is
/// treated as one row.
pub fn generate_bands(width: u32, height: u32, rows_per_task: u32) -> Vec<Band> {
    let rows_per_task = rows_per_task.max(1);
    let mut bands = Vec::new();

    let mut y = 0;
    while y < height {
        let rows = rows_per_task.min(height - y);
        bands.push(Band::new(y, width, rows, bands.len()));
        y += rows_per_task;
    }

    bands
}

/// Render every pixel of `band` into `framebuffer`, then mark it finished.
pub fn render_band(
    band: &Band,
    ctx: &RenderContext,
    config: &RenderConfig,
    framebuffer: &Framebuffer,
    rng: &mut dyn RngCore,
) {
    for row in band.rows() {
        for x in 0..band.width {
            let color = render_pixel(ctx, config, x, row, rng);
            framebuffer.set(x, row, color_to_rgba(color));
        }
    }
    framebuffer.finish_band();
}
