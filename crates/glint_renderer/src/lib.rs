//! Glint Renderer - CPU ray tracing.
//!
//! Casts primary rays from a pinhole (or thin-lens) camera, resolves the
//! nearest hit against a small list of analytic and implicit solids,
//! applies Phong shading with hard shadows from one directional light, and
//! follows a bounded chain of mirror reflections. Rays that escape the
//! scene sample an environment map.
//!
//! Rendering fans out one rayon task per horizontal band of scanlines into
//! a shared [`Framebuffer`].

mod band;
mod camera;
mod checkerboard;
mod context;
mod cube;
mod environment;
mod framebuffer;
mod hittable;
mod light;
mod random;
mod renderer;
mod sphere;
mod tetrahedron;
mod torus;

pub use band::{generate_bands, render_band, Band, DEFAULT_ROWS_PER_TASK};
pub use camera::Camera;
pub use checkerboard::Checkerboard;
pub use context::{ContextError, ContextResult, RenderContext};
pub use cube::Cube;
pub use environment::{Environment, Skybox, SolidColor};
pub use framebuffer::Framebuffer;
pub use hittable::{cast, Intersection, ObjectList, SceneObject};
pub use light::DirectionalLight;
pub use random::{band_rng, gen_f64};
pub use renderer::{
    color_to_rgba, in_shadow, render, render_into, render_pixel, sample_color, trace_ray, RenderConfig,
    Sample, SurfaceHit, TraceResult, REFLECTION_BIAS, SHADOW_BIAS,
};
pub use sphere::Sphere;
pub use tetrahedron::Tetrahedron;
pub use torus::Torus;

/// Re-export scene value types from glint_core
pub use glint_core::{Material, TorusMarch};

/// Re-export math types from glint_math
pub use glint_math::{DVec3, Interval, Ray};

/// Color type alias (RGB values typically 0-1, unclamped until output)
pub type Color = DVec3;
