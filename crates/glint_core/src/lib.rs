//! Glint Core - scene description and assets for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description**: `SceneDescription` and its parts, loaded from JSON
//! - **Materials and transforms**: plain values shared with the renderer
//! - **Textures**: decoded raster images used as environment maps
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/demo.json")?;
//! println!("Loaded {} objects", scene.objects.len());
//! ```

pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use scene::{
    load_scene, load_scene_from_str, CameraDesc, EnvironmentDesc, LightDesc, Material, ObjectDesc,
    RenderSettings, SceneDescription, SceneError, SceneResult, TorusMarch, Transform,
};
pub use texture::{load_texture_file, Texture, TextureError, TextureResult};
