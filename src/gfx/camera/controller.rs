//! Camera controller: a thin policy layer between shell input and the camera.

use cgmath::Vector3;

use super::camera::Camera;

/// The "home" pose a controller resets its camera to.
#[derive(Debug, Clone, Copy)]
struct HomePose {
    position: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    fov: f32,
}

/// Applies relative move/rotate/zoom to a camera and can reset it to a
/// configurable home pose.
///
/// The controller holds no camera reference; every mutator takes the target
/// camera as a parameter so the shell decides which camera is driven. Besides
/// the raw mutators it carries the drag-navigation math (orbit, pan, dolly,
/// wheel zoom) with per-pixel sensitivities as public fields, so any shell can
/// map pointer deltas onto camera motion without touching camera internals.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Orbit sensitivity, degrees per pixel.
    pub rotate_speed: f32,
    /// Pan sensitivity, world units per pixel.
    pub pan_speed: f32,
    /// Dolly sensitivity, world units per pixel.
    pub dolly_speed: f32,
    home: HomePose,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            rotate_speed: 0.2,
            pan_speed: 0.02,
            dolly_speed: 0.05,
            home: HomePose {
                position: Vector3::new(4.0, 3.0, 4.0),
                yaw: -135.0,
                pitch: -20.0,
                fov: 60.0,
            },
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the home pose used by [`reset`](Self::reset).
    pub fn set_home(&mut self, x: f32, y: f32, z: f32, yaw: f32, pitch: f32, fov: f32) {
        self.home = HomePose {
            position: Vector3::new(x, y, z),
            yaw,
            pitch,
            fov,
        };
    }

    /// Overwrites the camera's full state with the home pose.
    pub fn reset(&self, camera: &mut Camera) {
        camera.position = self.home.position;
        camera.yaw = self.home.yaw;
        camera.pitch = self.home.pitch;
        camera.fov = self.home.fov;
    }

    pub fn move_by(&self, camera: &mut Camera, dx: f32, dy: f32, dz: f32) {
        camera.move_by(dx, dy, dz);
    }

    pub fn rotate(&self, camera: &mut Camera, d_yaw: f32, d_pitch: f32) {
        camera.rotate(d_yaw, d_pitch);
    }

    pub fn zoom(&self, camera: &mut Camera, scale: f32) {
        camera.zoom(scale);
    }

    /// Orbit drag: pointer deltas in pixels become yaw/pitch changes.
    ///
    /// Screen Y grows downward, so a downward drag pitches the view down.
    pub fn orbit_drag(&self, camera: &mut Camera, dx_px: f32, dy_px: f32) {
        camera.rotate(dx_px * self.rotate_speed, -dy_px * self.rotate_speed);
    }

    /// Pan drag: translates the camera along its right/up axes.
    pub fn pan_drag(&self, camera: &mut Camera, dx_px: f32, dy_px: f32) {
        let basis = camera.basis();
        let delta =
            basis.right * (dx_px * self.pan_speed) + basis.up * (-dy_px * self.pan_speed);
        camera.move_by(delta.x, delta.y, delta.z);
    }

    /// Dolly drag: translates the camera along its forward axis.
    pub fn dolly_drag(&self, camera: &mut Camera, dy_px: f32) {
        let basis = camera.basis();
        let delta = basis.forward * (-dy_px * self.dolly_speed);
        camera.move_by(delta.x, delta.y, delta.z);
    }

    /// One wheel step: notch up narrows the field of view, notch down widens.
    pub fn wheel_zoom(&self, camera: &mut Camera, steps: f32) {
        let scale = if steps > 0.0 { 0.9 } else { 1.1 };
        camera.zoom(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{FOV_MAX_DEG, FOV_MIN_DEG};

    #[test]
    fn test_reset_restores_home_pose_exactly() {
        let mut controller = CameraController::new();
        controller.set_home(4.0, 3.0, 4.0, -135.0, -20.0, 60.0);

        let mut camera = Camera::default();
        controller.move_by(&mut camera, 10.0, -3.0, 7.5);
        controller.rotate(&mut camera, 720.0, -200.0);
        controller.zoom(&mut camera, 0.01);

        controller.reset(&mut camera);
        assert_eq!(camera.position, Vector3::new(4.0, 3.0, 4.0));
        assert_eq!(camera.yaw, -135.0);
        assert_eq!(camera.pitch, -20.0);
        assert_eq!(camera.fov, 60.0);
    }

    #[test]
    fn test_wheel_zoom_steps_stay_clamped() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        for _ in 0..100 {
            controller.wheel_zoom(&mut camera, 1.0);
        }
        assert_eq!(camera.fov, FOV_MIN_DEG);
        for _ in 0..100 {
            controller.wheel_zoom(&mut camera, -1.0);
        }
        assert_eq!(camera.fov, FOV_MAX_DEG);
    }

    #[test]
    fn test_orbit_drag_inverts_screen_y() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        controller.orbit_drag(&mut camera, 10.0, 5.0);
        assert_eq!(camera.yaw, 10.0 * controller.rotate_speed);
        assert_eq!(camera.pitch, -5.0 * controller.rotate_speed);
    }
}
