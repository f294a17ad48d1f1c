//! Whitted-style ray tracing pipeline.
//!
//! Implements:
//! - Phong shading with hard shadows from a single directional light
//! - A bounded, iterative chain of mirror reflections
//! - Anti-aliasing via jittered multi-sampling
//! - Parallel band rendering with rayon

use std::time::Instant;

use glint_core::RenderSettings;
use glint_math::VectorExt;
use rand::RngCore;
use rayon::prelude::*;

use crate::band::{generate_bands, render_band, DEFAULT_ROWS_PER_TASK};
use crate::{band_rng, gen_f64, Color, DVec3, Framebuffer, Ray, RenderContext};

/// Offset of shadow ray origins toward the light.
pub const SHADOW_BIAS: f64 = 1e-3;

/// Offset of reflection ray origins along the reflected direction.
pub const REFLECTION_BIAS: f64 = 1e-4;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Jittered samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum reflection bounces after the primary hit
    pub max_reflections: u32,
    /// Scanlines per parallel task
    pub rows_per_task: u32,
    /// Fixed seed for reproducible jitter; random when `None`
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 2,
            max_reflections: 3,
            rows_per_task: DEFAULT_ROWS_PER_TASK,
            seed: None,
        }
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            samples_per_pixel: settings.samples_per_pixel,
            max_reflections: settings.max_reflections,
            rows_per_task: settings.rows_per_task,
            seed: settings.seed,
        }
    }
}

/// Where a traced ray landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: DVec3,
    pub normal: DVec3,
}

/// Color seen along one ray, and the surface it hit if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    pub color: Color,
    pub hit: Option<SurfaceHit>,
}

/// True if anything lies between `point` and the light.
///
/// The shadow ray has no length limit.
pub fn in_shadow(ctx: &RenderContext, point: DVec3) -> bool {
    let to_light = ctx.light.direction_to_light();
    let shadow_ray = Ray::new(point + to_light * SHADOW_BIAS, to_light);
    ctx.objects.cast(&shadow_ray).is_some()
}

/// Local color along a single ray, without reflections.
///
/// A miss returns the environment color for the ray direction.
pub fn trace_ray(ctx: &RenderContext, ray: &Ray) -> TraceResult {
    let Some(hit) = ctx.objects.cast(ray) else {
        return TraceResult {
            color: ctx.environment.sample(ray.direction),
            hit: None,
        };
    };

    let normal = hit.object.normal_at(hit.point);
    let material = hit.object.material_at(hit.point);
    let view_dir = (ctx.camera.position - hit.point).safe_normalize();
    let lit = !in_shadow(ctx, hit.point);

    TraceResult {
        color: ctx.light.shade(&material, normal, view_dir, lit),
        hit: Some(SurfaceHit {
            point: hit.point,
            normal,
        }),
    }
}

/// Color of one sample, with its reflection chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub color: Color,
    /// Reflection rays that hit something
    pub bounces: u32,
}

/// Trace `ray` and follow up to `max_reflections` mirror bounces.
///
/// The chain stops at the first reflected ray that escapes. Reflected
/// colors are averaged over the bounces that hit and added to the local
/// color.
pub fn sample_color(ctx: &RenderContext, ray: &Ray, max_reflections: u32) -> Sample {
    let primary = trace_ray(ctx, ray);
    let Some(mut surface) = primary.hit else {
        return Sample {
            color: primary.color,
            bounces: 0,
        };
    };

    let mut direction = ray.direction;
    let mut reflected = Color::ZERO;
    let mut bounces = 0;

    for _ in 0..max_reflections {
        direction = direction.reflect(surface.normal);
        let bounce_ray = Ray::new(surface.point + direction * REFLECTION_BIAS, direction);

        let result = trace_ray(ctx, &bounce_ray);
        let Some(next) = result.hit else {
            break;
        };

        reflected += result.color;
        bounces += 1;
        direction = bounce_ray.direction;
        surface = next;
    }

    let mut color = primary.color;
    if bounces > 0 {
        color += reflected / bounces as f64;
    }

    Sample { color, bounces }
}

/// Render a single pixel with jittered multi-sampling.
///
/// `row` counts from the top of the image.
pub fn render_pixel(
    ctx: &RenderContext,
    config: &RenderConfig,
    x: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let screen_y = ctx.camera.height().saturating_sub(1).saturating_sub(row);
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let jx = x as f64 + gen_f64(rng) - 0.5;
        let jy = screen_y as f64 + gen_f64(rng) - 0.5;

        let ray = ctx.camera.ray_for(jx, jy, rng);
        pixel_color += sample_color(ctx, &ray, config.max_reflections).color;
    }

    pixel_color.safe_div(config.samples_per_pixel as f64)
}

/// Convert a color to 8-bit RGBA: clamp to [0, 1], scale, opaque alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let [r, g, b] = color.to_rgb8();
    [r, g, b, 255]
}

/// Render the whole image into a new framebuffer and wait for it.
pub fn render(ctx: &RenderContext, config: &RenderConfig) -> Framebuffer {
    let framebuffer = Framebuffer::new(ctx.camera.width(), ctx.camera.height());
    render_into(ctx, config, &framebuffer);
    framebuffer
}

/// Render into a caller-owned framebuffer, one rayon task per band.
///
/// The buffer may be read from other threads while this runs; see
/// [`Framebuffer::is_complete`].
pub fn render_into(ctx: &RenderContext, config: &RenderConfig, framebuffer: &Framebuffer) {
    let width = framebuffer.width().min(ctx.camera.width());
    let height = framebuffer.height().min(ctx.camera.height());
    let bands = generate_bands(width, height, config.rows_per_task);
    let seed = config.seed.unwrap_or_else(rand::random);

    log::info!(
        "Rendering {}x{} @ {} spp, {} reflections, {} bands",
        width,
        height,
        config.samples_per_pixel,
        config.max_reflections,
        bands.len()
    );
    log::debug!("Jitter seed: {seed}");

    let start = Instant::now();
    framebuffer.begin_pass(bands.len());

    bands.par_iter().for_each(|band| {
        let mut rng = band_rng(seed, band.index);
        render_band(band, ctx, config, framebuffer, &mut rng);
    });

    log::info!("Rendered in {:.2?}", start.elapsed());
}
