//! # Scene Management Module
//!
//! The full renderable state of the viewer: models (meshes + material +
//! texture reference), lights, one camera, and the line-oriented text
//! persistence that round-trips all of it.
//!
//! ## Key Components
//!
//! - [`Scene`] - owning container with capacity ceilings and load/save
//! - [`Model`] / [`Mesh`] / [`Material`] / [`TextureRef`] - scene entities
//! - [`SceneError`] - the I/O-level failures of persistence

pub mod mesh;
pub mod model;
pub mod persist;
pub mod scene;

// Re-export main types
pub use mesh::Mesh;
pub use model::{Material, Model, TextureRef};
pub use persist::SceneError;
pub use scene::{Scene, MAX_LIGHTS, MAX_MODELS};
