//! Models: named mesh bundles with a material and an optional texture.

use crate::gfx::color::Color;

use super::mesh::Mesh;

/// Surface properties of a model. Currently a single flat diffuse color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::WHITE,
        }
    }
}

/// Reference to a texture asset on disk.
///
/// `loaded` marks the reference as usable; the actual GPU upload happens
/// lazily in the renderer's texture cache. An empty `file` means no texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureRef {
    pub file: String,
    pub loaded: bool,
}

/// A named entity bundling one or more meshes with one material and one
/// optional texture. Owned exclusively by the scene that holds it.
///
/// The renderer currently draws only the first mesh of each model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub material: Material,
    pub texture: TextureRef,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A model carrying a single mesh.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            meshes: vec![mesh],
            ..Self::default()
        }
    }

    /// Points the model at a texture file and marks the reference usable.
    pub fn apply_texture(&mut self, file: impl Into<String>) {
        self.texture.file = file.into();
        self.texture.loaded = true;
    }
}
