//! Everything one render pass reads: objects, light, camera and background.

use glint_core::{EnvironmentDesc, ObjectDesc, SceneDescription, SceneError, TextureError, TorusMarch};
use thiserror::Error;

use crate::{
    Camera, Checkerboard, Cube, DirectionalLight, Environment, ObjectList, SceneObject, Skybox,
    SolidColor, Sphere, Tetrahedron, Torus,
};

/// Errors raised while turning a scene description into a render context.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Failed to load skybox: {0}")]
    Skybox(#[from] TextureError),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

pub type ContextResult<T> = Result<T, ContextError>;

/// Immutable scene state shared by every worker of a pass.
pub struct RenderContext {
    pub objects: ObjectList,
    pub light: DirectionalLight,
    pub camera: Camera,
    pub environment: Box<dyn Environment>,
}

impl RenderContext {
    pub fn new(
        objects: ObjectList,
        light: DirectionalLight,
        camera: Camera,
        environment: Box<dyn Environment>,
    ) -> Self {
        Self {
            objects,
            light,
            camera,
            environment,
        }
    }

    /// Build the context for a scene description.
    ///
    /// Tetrahedron transforms are baked into the vertices here and the
    /// skybox image, if any, is decoded. A skybox that fails to load is an
    /// error rather than a silent fallback.
    pub fn from_description(desc: &SceneDescription) -> ContextResult<Self> {
        desc.validate()?;

        let march = desc.render.torus_march;
        let objects: ObjectList = desc.objects.iter().map(|o| build_object(o, march)).collect();

        let light = DirectionalLight::from_desc(&desc.light);
        let camera = Camera::from_desc(&desc.camera, desc.render.width, desc.render.height);

        let environment: Box<dyn Environment> = match &desc.environment {
            EnvironmentDesc::Skybox { path } => Box::new(Skybox::load(path)?),
            EnvironmentDesc::Solid { color } => Box::new(SolidColor(*color)),
        };

        log::info!("Scene: {} objects", objects.len());
        log::debug!("{camera}");
        log::debug!("{light}");

        Ok(Self::new(objects, light, camera, environment))
    }
}

fn build_object(desc: &ObjectDesc, march: TorusMarch) -> Box<dyn SceneObject> {
    match desc {
        ObjectDesc::Sphere {
            center,
            radius,
            material,
        } => Box::new(Sphere::new(*center, *radius, *material)),
        ObjectDesc::Cube {
            center,
            size,
            material,
        } => Box::new(Cube::new(*center, *size, *material)),
        ObjectDesc::Checkerboard { height, even, odd } => {
            Box::new(Checkerboard::new(*height, *even, *odd))
        }
        ObjectDesc::Torus {
            center,
            major_radius,
            minor_radius,
            material,
        } => Box::new(Torus::new(*center, *major_radius, *minor_radius, *material).with_march(march)),
        ObjectDesc::Tetrahedron {
            vertices,
            transform,
            material,
        } => {
            let [v0, v1, v2, v3] = *vertices;
            let mut tetrahedron = Tetrahedron::new(v0, v1, v2, v3, *material);
            tetrahedron.apply_transform(&transform.to_matrix());
            Box::new(tetrahedron)
        }
    }
}
