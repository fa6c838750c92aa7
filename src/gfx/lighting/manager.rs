//! Arena-style container for lights owned outside a scene.

use cgmath::Vector3;

use crate::gfx::color::Color;

use super::light::Light;

/// Observer handle into a [`LightManager`].
///
/// A handle is an index into the manager's storage and stays valid only while
/// the manager is not mutated; `remove` shifts the handles of every light
/// stored after the removed one. Callers that hold handles across mutations
/// should re-fetch them via [`LightManager::all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightId(usize);

/// Owns a collection of lights independently of any scene.
///
/// Used by higher-level tooling to create, configure and remove lights. New
/// lights created by [`add_light`](Self::add_light) start from the manager's
/// configurable default color and intensity.
#[derive(Debug)]
pub struct LightManager {
    lights: Vec<Light>,
    default_color: Color,
    default_intensity: f32,
}

impl Default for LightManager {
    fn default() -> Self {
        Self {
            lights: Vec::new(),
            default_color: Color::WHITE,
            default_intensity: 1.0,
        }
    }
}

impl LightManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a point light from the manager defaults and returns its handle.
    pub fn add_light(&mut self) -> LightId {
        let light = Light {
            color: self.default_color,
            intensity: self.default_intensity,
            ..Light::default()
        };
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    /// Creates and configures a point light in one call.
    pub fn add_point_light(
        &mut self,
        position: Vector3<f32>,
        intensity: f32,
        color: Color,
    ) -> LightId {
        self.lights.push(Light::point(position, intensity, color));
        LightId(self.lights.len() - 1)
    }

    /// Mutates an existing light's intensity and color in place.
    ///
    /// A stale handle is ignored.
    pub fn configure(&mut self, id: LightId, intensity: f32, color: Color) {
        if let Some(light) = self.lights.get_mut(id.0) {
            light.intensity = intensity;
            light.color = color;
        }
    }

    /// Removes the light behind `id`. Handles after it shift down by one.
    pub fn remove(&mut self, id: LightId) {
        if id.0 < self.lights.len() {
            self.lights.remove(id.0);
        }
    }

    /// Snapshot of handles for every stored light, in storage order.
    pub fn all(&self) -> Vec<LightId> {
        (0..self.lights.len()).map(LightId).collect()
    }

    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Default color applied to lights created by future `add_light` calls.
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    /// Default intensity applied to lights created by future `add_light` calls.
    pub fn set_default_intensity(&mut self, intensity: f32) {
        self.default_intensity = intensity;
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn default_intensity(&self) -> f32 {
        self.default_intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::light::LightKind;

    #[test]
    fn test_add_light_uses_manager_defaults() {
        let mut manager = LightManager::new();
        manager.set_default_color(Color::rgb(1.0, 0.5, 0.0));
        manager.set_default_intensity(2.5);

        let id = manager.add_light();
        let light = manager.get(id).unwrap();
        assert_eq!(light.kind, LightKind::Point);
        assert_eq!(light.color, Color::rgb(1.0, 0.5, 0.0));
        assert_eq!(light.intensity, 2.5);
    }

    #[test]
    fn test_configure_and_remove() {
        let mut manager = LightManager::new();
        let a = manager.add_point_light(Vector3::new(1.0, 2.0, 3.0), 1.0, Color::WHITE);
        let b = manager.add_point_light(Vector3::new(4.0, 5.0, 6.0), 1.0, Color::WHITE);

        manager.configure(a, 3.0, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(manager.get(a).unwrap().intensity, 3.0);

        manager.remove(a);
        assert_eq!(manager.len(), 1);
        // `b` referred to the second slot and is stale after the removal.
        assert!(manager.get(b).is_none());
        assert_eq!(
            manager.get(manager.all()[0]).unwrap().position,
            Vector3::new(4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn test_all_returns_storage_order() {
        let mut manager = LightManager::new();
        manager.add_light();
        manager.add_light();
        manager.add_light();
        let handles = manager.all();
        assert_eq!(handles.len(), 3);
        assert_eq!(handles[0], LightId(0));
        assert_eq!(handles[2], LightId(2));
    }
}
