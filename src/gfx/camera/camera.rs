//! Free-look camera state and the orthonormal basis derived from it.

use cgmath::{InnerSpace, Vector3};

/// Field-of-view limits enforced by [`Camera::zoom`], in degrees.
pub const FOV_MIN_DEG: f32 = 10.0;
pub const FOV_MAX_DEG: f32 = 120.0;

/// A free-look camera described by a world position, yaw/pitch angles and a
/// vertical field of view.
///
/// Yaw and pitch are stored in degrees and intentionally unbounded: yaw may
/// wrap past 360 and pitch may exceed ±90, inverting the apparent up vector.
/// Only the field of view is clamped, and only by [`zoom`](Self::zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    /// Heading angle in degrees.
    pub yaw: f32,
    /// Elevation angle in degrees.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 5.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
        }
    }
}

impl Camera {
    /// Translates the position by the given world-space delta. No bounds.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Adds to yaw and pitch. No clamping or normalization.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    /// Multiplies the field of view by `scale`, then clamps it to
    /// [[`FOV_MIN_DEG`], [`FOV_MAX_DEG`]].
    ///
    /// Used both for discrete wheel-step zoom and for shell zoom actions.
    pub fn zoom(&mut self, scale: f32) {
        self.fov = (self.fov * scale).clamp(FOV_MIN_DEG, FOV_MAX_DEG);
    }

    /// Derives the orthonormal basis for the current yaw/pitch.
    ///
    /// Recomputed on every call so it always reflects the latest angles.
    pub fn basis(&self) -> Basis {
        Basis::from_angles(self.yaw, self.pitch)
    }
}

/// The orthonormal (forward, right, up) triple for a yaw/pitch pair.
///
/// Shared by camera-relative pan/dolly math, view-matrix construction and
/// sample-shape placement.
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Basis {
    const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

    /// Builds the basis from yaw/pitch angles in degrees.
    ///
    /// When forward is parallel to world-up (pitch near ±90°) the cross
    /// product degenerates; right then falls back to the world X axis.
    pub fn from_angles(yaw_deg: f32, pitch_deg: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw_deg.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = pitch_deg.to_radians().sin_cos();

        let forward =
            Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize();

        let right = forward.cross(Self::WORLD_UP);
        let right = if right.magnitude2() < 1e-6 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            right.normalize()
        };

        let up = right.cross(forward).normalize();

        Self { forward, right, up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps_to_limits() {
        let mut camera = Camera::default();
        for _ in 0..20 {
            camera.zoom(0.01);
        }
        assert_eq!(camera.fov, FOV_MIN_DEG);

        for _ in 0..20 {
            camera.zoom(100.0);
        }
        assert_eq!(camera.fov, FOV_MAX_DEG);
    }

    #[test]
    fn test_rotate_is_unbounded() {
        let mut camera = Camera::default();
        camera.rotate(400.0, -120.0);
        assert_eq!(camera.yaw, 400.0);
        assert_eq!(camera.pitch, -120.0);
    }

    #[test]
    fn test_move_by_translates_position() {
        let mut camera = Camera::default();
        camera.move_by(1.0, -2.0, 0.5);
        assert_eq!(camera.position, Vector3::new(1.0, -2.0, 5.5));
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for &(yaw, pitch) in &[
            (0.0f32, 0.0f32),
            (-135.0, -20.0),
            (90.0, 45.0),
            (400.0, -60.0),
            (12.5, 89.0),
        ] {
            let basis = Basis::from_angles(yaw, pitch);
            assert!((basis.forward.magnitude() - 1.0).abs() < 1e-5);
            assert!((basis.right.magnitude() - 1.0).abs() < 1e-5);
            assert!((basis.up.magnitude() - 1.0).abs() < 1e-5);
            assert!(basis.forward.dot(basis.right).abs() < 1e-5);
            assert!(basis.forward.dot(basis.up).abs() < 1e-5);
            assert!(basis.right.dot(basis.up).abs() < 1e-5);
        }
    }

    #[test]
    fn test_basis_degenerate_pitch_falls_back() {
        let basis = Basis::from_angles(0.0, 90.0);
        assert_eq!(basis.right, Vector3::new(1.0, 0.0, 0.0));

        let basis = Basis::from_angles(30.0, -90.0);
        assert_eq!(basis.right, Vector3::new(1.0, 0.0, 0.0));
    }
}
