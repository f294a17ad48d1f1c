//! Scene description types for Glint.
//!
//! A scene is a camera, a single directional light, an environment and an
//! ordered list of solids. It is plain data: the renderer turns it into
//! intersectable objects once per render pass.

use std::path::{Path, PathBuf};

use glint_math::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Phong surface parameters at a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: DVec3,

    /// Specular highlight color (RGB, 0-1)
    pub specular_color: DVec3,

    /// Ambient color (RGB, 0-1)
    pub ambient_color: DVec3,

    /// Phong exponent
    pub shininess: f64,

    /// Carried with the material; the shading pipeline does not weight
    /// reflections by it.
    pub reflectivity: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: DVec3::splat(0.5),
            specular_color: DVec3::splat(0.5),
            ambient_color: DVec3::splat(0.1),
            shininess: 32.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// A material using one color for every term and no highlight exponent.
    pub fn flat(color: DVec3) -> Self {
        Self {
            diffuse_color: color,
            specular_color: color,
            ambient_color: color,
            shininess: 0.0,
            reflectivity: 0.0,
        }
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Translation
    pub translation: DVec3,

    /// Rotation around the Y axis, in degrees
    pub rotation_y_degrees: f64,

    /// Scale
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation_y_degrees: 0.0,
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation)
            * DMat4::from_rotation_y(self.rotation_y_degrees.to_radians())
            * DMat4::from_scale(self.scale)
    }
}

/// How the torus intersection searches along the ray.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorusMarch {
    /// Fixed half-steps across the whole search range.
    Fixed,
    /// Steps bounded by the signed distance to the surface.
    #[default]
    SphereTrace,
}

/// Image and sampling settings for a render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    /// Maximum length of the reflection chain after the primary hit
    pub max_reflections: u32,
    /// Scanlines per parallel task
    pub rows_per_task: u32,
    /// Fixed seed for jitter and depth of field; random when unset
    pub seed: Option<u64>,
    pub torus_march: TorusMarch,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            samples_per_pixel: 2,
            max_reflections: 3,
            rows_per_task: 80,
            seed: None,
            torus_march: TorusMarch::default(),
        }
    }
}

/// Pinhole camera with optional thin-lens depth of field.
///
/// The camera looks down -Z; the image plane size comes from the render
/// settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: DVec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    /// Distance to the plane of perfect focus
    pub focus_distance: f64,
    /// Lens diameter; 0 disables depth of field
    pub aperture: f64,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 10.0),
            fov_degrees: 60.0,
            focus_distance: 15.0,
            aperture: 0.0,
        }
    }
}

/// The scene's single directional light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDesc {
    /// Direction the light travels (from the light into the scene)
    pub direction: DVec3,
    pub strength: f64,
    pub diffuse_color: DVec3,
    pub specular_color: DVec3,
    pub ambient_color: DVec3,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            direction: DVec3::new(-1.0, -1.0, -1.0),
            strength: 1.0,
            diffuse_color: DVec3::ONE,
            specular_color: DVec3::ONE,
            ambient_color: DVec3::splat(0.2),
        }
    }
}

/// What rays that escape the scene see.
///
/// Defaults to a solid sky blue so scenes render without an image on disk.
/// `scenes/demo_skybox.json` is the demo scene lit against an
/// equirectangular `skybox.jpeg` placed next to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvironmentDesc {
    /// Equirectangular image
    Skybox { path: PathBuf },
    /// Constant color
    Solid { color: DVec3 },
}

impl Default for EnvironmentDesc {
    fn default() -> Self {
        EnvironmentDesc::Solid {
            color: DVec3::new(0.5, 0.7, 1.0),
        }
    }
}

/// A solid in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: DVec3,
        radius: f64,
        #[serde(default)]
        material: Material,
    },
    /// Axis-aligned cube
    Cube {
        center: DVec3,
        size: f64,
        #[serde(default)]
        material: Material,
    },
    /// Infinite horizontal plane with a 3x3-unit checker pattern
    Checkerboard {
        height: f64,
        even: Material,
        odd: Material,
    },
    /// Torus lying in the XZ plane
    Torus {
        #[serde(default)]
        center: DVec3,
        major_radius: f64,
        minor_radius: f64,
        #[serde(default)]
        material: Material,
    },
    /// Four vertices; faces are (0,1,2), (0,1,3), (0,2,3), (1,2,3)
    Tetrahedron {
        vertices: [DVec3; 4],
        #[serde(default)]
        transform: Transform,
        #[serde(default)]
        material: Material,
    },
}

/// A complete scene: settings, camera, light, environment and solids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub camera: CameraDesc,

    #[serde(default)]
    pub light: LightDesc,

    #[serde(default)]
    pub environment: EnvironmentDesc,

    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// The built-in demo scene: a cube, a torus, two spheres and a
    /// tetrahedron above an infinite checkerboard floor.
    pub fn demo() -> Self {
        let cube_material = Material {
            diffuse_color: DVec3::new(0.8, 0.2, 0.2),
            specular_color: DVec3::splat(0.5),
            ambient_color: DVec3::splat(0.1),
            shininess: 20.0,
            reflectivity: 0.3,
        };
        let torus_material = Material {
            diffuse_color: DVec3::new(0.7, 0.7, 0.2),
            ..cube_material
        };
        let board_material = Material {
            diffuse_color: DVec3::splat(0.5),
            specular_color: DVec3::splat(0.5),
            ambient_color: DVec3::new(0.5, 0.5, 0.0),
            shininess: 0.5,
            reflectivity: 0.0,
        };
        let glossy = |color: DVec3| Material {
            diffuse_color: color,
            specular_color: DVec3::ONE,
            ambient_color: DVec3::splat(0.1),
            shininess: 32.0,
            reflectivity: 0.0,
        };

        Self {
            render: RenderSettings::default(),
            camera: CameraDesc {
                aperture: 0.5,
                ..Default::default()
            },
            light: LightDesc::default(),
            environment: EnvironmentDesc::default(),
            objects: vec![
                ObjectDesc::Cube {
                    center: DVec3::new(-7.0, 2.0, -10.0),
                    size: 2.0,
                    material: cube_material,
                },
                ObjectDesc::Torus {
                    center: DVec3::ZERO,
                    major_radius: 1.0,
                    minor_radius: 0.3,
                    material: torus_material,
                },
                ObjectDesc::Checkerboard {
                    height: -4.0,
                    even: board_material,
                    odd: Material::flat(DVec3::ZERO),
                },
                ObjectDesc::Sphere {
                    center: DVec3::new(0.0, 2.0, -10.0),
                    radius: 2.0,
                    material: glossy(DVec3::new(1.0, 0.0, 0.0)),
                },
                ObjectDesc::Sphere {
                    center: DVec3::new(5.0, 2.0, -15.0),
                    radius: 2.0,
                    material: glossy(DVec3::new(0.0, 1.0, 0.0)),
                },
                ObjectDesc::Tetrahedron {
                    vertices: [
                        DVec3::new(1.0, 1.0, 1.0),
                        DVec3::new(1.0, -1.0, -1.0),
                        DVec3::new(-1.0, 1.0, -1.0),
                        DVec3::new(-1.0, -1.0, 1.0),
                    ],
                    transform: Transform {
                        translation: DVec3::new(-3.5, -2.0, -4.0),
                        rotation_y_degrees: 30.0,
                        scale: DVec3::splat(1.2),
                    },
                    material: glossy(DVec3::new(0.2, 0.3, 0.9)),
                },
            ],
        }
    }

    /// Check the settings and object parameters for values the renderer
    /// cannot work with.
    pub fn validate(&self) -> SceneResult<()> {
        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(SceneError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                r.width, r.height
            )));
        }
        if r.samples_per_pixel == 0 {
            return Err(SceneError::Invalid("samples_per_pixel must be at least 1".into()));
        }
        if r.rows_per_task == 0 {
            return Err(SceneError::Invalid("rows_per_task must be at least 1".into()));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(SceneError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.camera.fov_degrees
            )));
        }
        if self.camera.aperture < 0.0 {
            return Err(SceneError::Invalid("aperture must not be negative".into()));
        }

        for (index, object) in self.objects.iter().enumerate() {
            let positive = |name: &str, value: f64| {
                if value > 0.0 {
                    Ok(())
                } else {
                    Err(SceneError::Invalid(format!(
                        "object {index}: {name} must be positive, got {value}"
                    )))
                }
            };

            match object {
                ObjectDesc::Sphere { radius, .. } => positive("radius", *radius)?,
                ObjectDesc::Cube { size, .. } => positive("size", *size)?,
                ObjectDesc::Torus {
                    major_radius,
                    minor_radius,
                    ..
                } => {
                    positive("major_radius", *major_radius)?;
                    positive("minor_radius", *minor_radius)?;
                }
                ObjectDesc::Checkerboard { .. } | ObjectDesc::Tetrahedron { .. } => {}
            }
        }

        Ok(())
    }

    /// Resolve relative asset paths against `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if let EnvironmentDesc::Skybox { path } = &mut self.environment {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}

/// Parse and validate a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    scene.validate()?;
    Ok(scene)
}

/// Load a scene file. Relative skybox paths are taken relative to the file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut scene = load_scene_from_str(&text)?;
    if let Some(dir) = path.parent() {
        scene.resolve_paths(dir);
    }

    log::info!(
        "Loaded scene {} ({} objects, {}x{})",
        path.display(),
        scene.objects.len(),
        scene.render.width,
        scene.render.height
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_to_matrix_order() {
        let transform = Transform {
            translation: DVec3::new(1.0, 2.0, 3.0),
            rotation_y_degrees: 90.0,
            scale: DVec3::splat(2.0),
        };

        // Scale first, then rotate +X onto -Z, then translate
        let p = transform.to_matrix().transform_point3(DVec3::X);
        assert!((p - DVec3::new(1.0, 2.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = SceneDescription::demo();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.objects.len(), 6);
    }

    #[test]
    fn test_parse_minimal_scene_uses_defaults() {
        let scene = load_scene_from_str(
            r#"{
                "objects": [
                    { "type": "sphere", "center": [0, 0, -10], "radius": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.render, RenderSettings::default());
        assert_eq!(scene.camera, CameraDesc::default());
        assert_eq!(scene.objects.len(), 1);
        match &scene.objects[0] {
            ObjectDesc::Sphere { center, radius, material } => {
                assert_eq!(*center, DVec3::new(0.0, 0.0, -10.0));
                assert_eq!(*radius, 2.0);
                assert_eq!(*material, Material::default());
            }
            other => panic!("unexpected object {other:?}"),
        }
    }

    #[test]
    fn test_parse_every_object_kind() {
        let scene = load_scene_from_str(
            r#"{
                "render": { "width": 64, "height": 32, "torus_march": "fixed", "seed": 7 },
                "environment": { "type": "skybox", "path": "sky.jpeg" },
                "objects": [
                    { "type": "cube", "center": [0, 0, 0], "size": 1 },
                    { "type": "checkerboard", "height": -4,
                      "even": { "diffuse_color": [1, 1, 1] },
                      "odd": { "diffuse_color": [0, 0, 0] } },
                    { "type": "torus", "major_radius": 1, "minor_radius": 0.25 },
                    { "type": "tetrahedron",
                      "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
                      "transform": { "translation": [0, 1, 0] } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.render.width, 64);
        assert_eq!(scene.render.seed, Some(7));
        assert_eq!(scene.render.torus_march, TorusMarch::Fixed);
        assert_eq!(scene.render.samples_per_pixel, 2);
        assert_eq!(scene.objects.len(), 4);
        assert!(matches!(scene.environment, EnvironmentDesc::Skybox { .. }));
    }

    #[test]
    fn test_bundled_demo_file_matches_builtin() {
        let scene = load_scene_from_str(include_str!("../../../scenes/demo.json")).unwrap();
        assert_eq!(scene, SceneDescription::demo());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_radius = r#"{ "objects": [ { "type": "sphere", "center": [0,0,0], "radius": 0 } ] }"#;
        assert!(matches!(load_scene_from_str(bad_radius), Err(SceneError::Invalid(_))));

        let bad_size = r#"{ "render": { "width": 0 } }"#;
        assert!(matches!(load_scene_from_str(bad_size), Err(SceneError::Invalid(_))));

        let bad_rows = r#"{ "render": { "rows_per_task": 0 } }"#;
        assert!(matches!(load_scene_from_str(bad_rows), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_unknown_object_type_is_parse_error() {
        let text = r#"{ "objects": [ { "type": "cone", "height": 1 } ] }"#;
        assert!(matches!(load_scene_from_str(text), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_resolve_relative_skybox_path() {
        let mut scene = SceneDescription {
            environment: EnvironmentDesc::Skybox {
                path: PathBuf::from("sky.jpeg"),
            },
            ..Default::default()
        };
        scene.resolve_paths(Path::new("/assets/scenes"));

        assert_eq!(
            scene.environment,
            EnvironmentDesc::Skybox {
                path: PathBuf::from("/assets/scenes/sky.jpeg")
            }
        );
    }

    #[test]
    fn test_load_scene_missing_file() {
        let result = load_scene("no/such/scene.json");
        assert!(matches!(result, Err(SceneError::Io { .. })));
    }

    #[test]
    fn test_bundled_skybox_scene_resolves_next_to_file() {
        let scene = load_scene("../../scenes/demo_skybox.json").unwrap();
        assert_eq!(
            scene.environment,
            EnvironmentDesc::Skybox {
                path: Path::new("../../scenes").join("skybox.jpeg")
            }
        );
        assert_eq!(scene.objects, SceneDescription::demo().objects);
    }
}
