//! The scene: the full renderable state of the viewer.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::gfx::camera::Camera;
use crate::gfx::color::Color;
use crate::gfx::lighting::Light;

use super::model::Model;
use super::persist::{self, SceneError};

/// Hard ceiling on models a scene will hold.
pub const MAX_MODELS: usize = 50;
/// Hard ceiling on lights a scene will hold.
pub const MAX_LIGHTS: usize = 10;

/// Owns an ordered collection of models, an ordered collection of lights and
/// exactly one camera.
///
/// Models and lights are append-only through the capacity-gated
/// [`add_model`](Self::add_model)/[`add_light`](Self::add_light); past the
/// ceiling an add fails softly by returning `false` without mutating the
/// scene. [`load_from_file`](Self::load_from_file) clears and repopulates the
/// collections wholesale.
#[derive(Debug, Default)]
pub struct Scene {
    models: Vec<Model>,
    lights: Vec<Light>,
    pub camera: Camera,
}

impl Scene {
    /// An empty scene with a default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model. Returns `false` without mutation when the scene is at
    /// capacity; callers must check the result.
    pub fn add_model(&mut self, model: Model) -> bool {
        if self.models.len() >= MAX_MODELS {
            return false;
        }
        self.models.push(model);
        true
    }

    /// Appends a light. Same fail-soft capacity policy as `add_model`.
    pub fn add_light(&mut self, light: Light) -> bool {
        if self.lights.len() >= MAX_LIGHTS {
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn model_mut(&mut self, index: usize) -> Option<&mut Model> {
        self.models.get_mut(index)
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Drops every model and light, keeping the camera.
    pub fn clear(&mut self) {
        self.models.clear();
        self.lights.clear();
    }

    /// Drops a point light at the current camera position.
    pub fn place_light_here(&mut self, intensity: f32, color: Color) -> bool {
        self.add_light(Light::point(self.camera.position, intensity, color))
    }

    /// Replaces the scene's models and lights with the contents of a scene
    /// file.
    ///
    /// Fails only when the file cannot be opened, in which case the current
    /// scene is left untouched. Once the file is open the existing models and
    /// lights are cleared and the body is parsed permissively: a truncated or
    /// malformed record stops the affected inner loop early and whatever was
    /// already parsed is kept, so `Ok` does not imply the file parsed
    /// completely. The file's CAMERA line is read but not applied; the live
    /// camera is never modified by a load.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SceneError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.clear();
        persist::read_scene(BufReader::new(file), self);
        Ok(())
    }

    /// Writes camera, lights and models to a scene file.
    ///
    /// Fails when the file cannot be created or a write fails mid-stream.
    /// Writing is not atomic; a failure partway through leaves a partial
    /// file behind.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SceneError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        persist::write_scene(&mut writer, self)
            .and_then(|_| writer.flush())
            .map_err(|source| SceneError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Mesh;
    use cgmath::Vector3;

    #[test]
    fn test_model_capacity_is_fail_soft() {
        let mut scene = Scene::new();
        for i in 0..MAX_MODELS {
            assert!(scene.add_model(Model::new(format!("m{i}"))));
        }
        assert!(!scene.add_model(Model::new("overflow")));
        assert_eq!(scene.models().len(), MAX_MODELS);
    }

    #[test]
    fn test_light_capacity_is_fail_soft() {
        let mut scene = Scene::new();
        for _ in 0..MAX_LIGHTS {
            assert!(scene.add_light(Light::default()));
        }
        assert!(!scene.add_light(Light::default()));
        assert_eq!(scene.lights().len(), MAX_LIGHTS);
    }

    #[test]
    fn test_place_light_here_uses_camera_position() {
        let mut scene = Scene::new();
        scene.camera.position = Vector3::new(1.0, 2.0, 3.0);
        assert!(scene.place_light_here(2.0, Color::rgb(1.0, 0.0, 0.0)));
        let light = &scene.lights()[0];
        assert_eq!(light.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(light.intensity, 2.0);
    }

    #[test]
    fn test_load_failure_leaves_scene_untouched() {
        let mut scene = Scene::new();
        scene.add_model(Model::with_mesh(
            "keep",
            Mesh::new(vec![Vector3::new(0.0, 0.0, 0.0)], vec![]),
        ));
        scene.add_light(Light::default());

        let result = scene.load_from_file("definitely/not/a/real/path.scene");
        assert!(result.is_err());
        assert_eq!(scene.models().len(), 1);
        assert_eq!(scene.lights().len(), 1);
    }
}
