//! # Graphics Module
//!
//! Everything the viewer renders and the state it renders from:
//!
//! - **Camera System** ([`camera`]) - free-look camera, derived basis and the
//!   controller policy layer (home pose, orbit/pan/dolly/zoom)
//! - **Lighting** ([`lighting`]) - light entities and the standalone manager
//! - **Scene Management** ([`scene`]) - models, meshes, materials, capacity
//!   ceilings and text persistence
//! - **Sample Geometry** ([`geometry`]) - procedural shapes placed in view
//! - **Rendering** ([`rendering`]) - the wgpu forward pipeline, frame-data
//!   math and texture cache

pub mod camera;
pub mod color;
pub mod geometry;
pub mod lighting;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, CameraController};
pub use color::Color;
pub use lighting::{Light, LightKind, LightManager};
pub use rendering::{FrameScene, Renderer};
pub use scene::{Mesh, Model, Scene, SceneError};
