//! Vantage 3D Scene Viewer
//!
//! An interactive scene viewer built on wgpu and winit: a small scene of
//! models, point/directional lights and one free-look camera, rendered every
//! frame with a forward, per-fragment-lit pipeline and persisted through a
//! plain-text scene format.

pub mod app;
pub mod gfx;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use gfx::{Camera, CameraController, Color, FrameScene, Light, LightKind, LightManager};
pub use gfx::{Mesh, Model, Renderer, Scene, SceneError};
