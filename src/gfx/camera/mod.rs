pub mod camera;
pub mod controller;

// Re-export main types
pub use camera::{Basis, Camera, FOV_MAX_DEG, FOV_MIN_DEG};
pub use controller::CameraController;
