//! Light entities.

use cgmath::Vector3;

use crate::gfx::color::Color;

/// Discriminates how a light is meant to emit.
///
/// Only persistence and (eventually) shading care about the distinction, so a
/// plain enum with exhaustive matching at those call sites is all that is
/// needed. Note that the shading path currently treats both kinds as
/// positional; see the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

/// A single light source: point or directional.
///
/// `intensity` is a unitless multiplier and is not clamped at the data level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub color: Color,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            position: Vector3::new(0.0, 0.0, 0.0),
            direction: Vector3::new(0.0, -1.0, 0.0),
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

impl Light {
    /// A point light at `position` with the given intensity and color.
    pub fn point(position: Vector3<f32>, intensity: f32, color: Color) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            intensity,
            color,
            ..Self::default()
        }
    }
}
