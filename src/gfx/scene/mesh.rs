//! Triangle-list mesh data.

use cgmath::Vector3;

/// A triangle list: vertex positions plus a flat index buffer, three indices
/// per triangle.
///
/// Indices are expected to be `< vertices.len()`; out-of-range entries are
/// not rejected here but skipped defensively by the renderer, triangle by
/// triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vector3<f32>>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
