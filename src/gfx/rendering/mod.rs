//! # Rendering Module
//!
//! The forward, per-fragment-lit frame pipeline: the wgpu renderer, the pure
//! CPU frame-data math it runs on (normal generation, UV fallback, light
//! packing), and the path-keyed texture cache.
//!
//! The shell hands the renderer a fresh [`FrameScene`] borrow-set for every
//! frame; the renderer never retains scene references between frames.

pub mod frame_data;
pub mod render_engine;
pub mod texture_cache;

// Re-export main types
pub use render_engine::Renderer;
pub use texture_cache::{PathCache, TextureCache};

use crate::gfx::camera::Camera;
use crate::gfx::lighting::Light;
use crate::gfx::scene::{Model, Scene};

/// The scene view rendered this frame: one optional camera plus the light and
/// model lists, all borrowed from the owning scene.
///
/// Rebuilt by the caller once per intended frame, which keeps the renderer
/// free of dangling state when the scene is mutated or reloaded between
/// frames.
#[derive(Default)]
pub struct FrameScene<'a> {
    camera: Option<&'a Camera>,
    lights: Vec<&'a Light>,
    models: Vec<&'a Model>,
}

impl<'a> FrameScene<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the whole scene: its camera, every light and every model.
    pub fn from_scene(scene: &'a Scene) -> Self {
        let mut frame = Self::new();
        frame.set_camera(&scene.camera);
        frame.set_lights(scene.lights());
        for model in scene.models() {
            frame.add_model(model);
        }
        frame
    }

    pub fn set_camera(&mut self, camera: &'a Camera) {
        self.camera = Some(camera);
    }

    pub fn set_lights(&mut self, lights: impl IntoIterator<Item = &'a Light>) {
        self.lights = lights.into_iter().collect();
    }

    pub fn add_model(&mut self, model: &'a Model) {
        self.models.push(model);
    }

    pub fn clear_models(&mut self) {
        self.models.clear();
    }

    pub fn camera(&self) -> Option<&'a Camera> {
        self.camera
    }

    pub fn lights(&self) -> &[&'a Light] {
        &self.lights
    }

    pub fn models(&self) -> &[&'a Model] {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::add_triangle_sample;

    #[test]
    fn test_triangle_scene_assembles_full_draw_data() {
        // The ambient-only path: a fresh scene with one sample triangle and
        // no lights still yields a complete set of per-frame draw data.
        let mut scene = Scene::new();
        add_triangle_sample(&mut scene);
        let frame = FrameScene::from_scene(&scene);

        let packed = frame_data::pack_lights(frame.lights());
        assert_eq!(packed.count, 0);
        assert!(frame_data::light_markers(frame.lights()).is_empty());

        let mesh = &frame.models()[0].meshes[0];
        let vertices = frame_data::mesh_vertices(mesh);
        let indices = frame_data::valid_triangle_indices(mesh);
        assert_eq!(vertices.len(), 3);
        assert_eq!(indices, vec![0, 1, 2]);
        // Every vertex carries a real normal and in-range UVs.
        for v in &vertices {
            assert!(v.normal.iter().any(|&c| c != 0.0));
            assert!(v.uv.iter().all(|&c| (0.0..=1.0).contains(&c)));
        }
    }

    #[test]
    fn test_from_scene_borrows_everything() {
        let mut scene = Scene::new();
        add_triangle_sample(&mut scene);
        scene.add_light(Light::default());

        let frame = FrameScene::from_scene(&scene);
        assert!(frame.camera().is_some());
        assert_eq!(frame.lights().len(), 1);
        assert_eq!(frame.models().len(), 1);
    }

    #[test]
    fn test_clear_models_empties_only_models() {
        let mut scene = Scene::new();
        add_triangle_sample(&mut scene);
        scene.add_light(Light::default());

        let mut frame = FrameScene::from_scene(&scene);
        frame.clear_models();
        assert!(frame.models().is_empty());
        assert_eq!(frame.lights().len(), 1);
    }
}
