//! # Procedural Sample Geometry
//!
//! Functions that drop ready-made sample shapes into a scene, placed in front
//! of the current camera so they are visible immediately. Used by the shell's
//! sample actions and as the fallback content for an empty startup scene.

pub mod samples;

pub use samples::{add_cube_sample, add_pyramid_sample, add_sphere_sample, add_triangle_sample};
