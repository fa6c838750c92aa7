//! CPU-side frame data: vertex formats, derived mesh attributes and packed
//! light arrays.
//!
//! Everything here is pure computation on scene data, kept separate from the
//! GPU plumbing so the per-frame pipeline math stays testable without a
//! device.

use std::mem;

use cgmath::{InnerSpace, Vector3, Zero};

use crate::gfx::lighting::Light;
use crate::gfx::scene::Mesh;

/// Hard shader-side limit on simultaneously shaded lights. Lights beyond the
/// first 16 are silently ignored by the packing step.
pub const MAX_SHADER_LIGHTS: usize = 16;

/// World-space length of each debug axis line.
pub const AXIS_LENGTH: f32 = 5.0;
const ARROW_SIZE: f32 = 0.4;

/// Vertex format of the lit mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Vertex format of the unlit line pipeline (debug axes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Vertex format of the light marker pipeline: a world-space center expanded
/// to a fixed-pixel-size quad in the vertex shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerVertex {
    pub center: [f32; 3],
    pub corner: [f32; 2],
    pub color: [f32; 4],
}

impl MarkerVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MarkerVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Computes per-vertex normals by averaging face normals.
///
/// Every triangle contributes its normalized face normal to each of its three
/// vertices; the accumulated vectors are renormalized at the end. Triangles
/// with an out-of-range index are skipped, as are degenerate triangles with a
/// zero-area face. Vertices touched by no valid triangle keep a zero normal.
pub fn averaged_vertex_normals(mesh: &Mesh) -> Vec<Vector3<f32>> {
    let vertex_count = mesh.vertices.len();
    let mut normals = vec![Vector3::zero(); vertex_count];

    for triangle in mesh.indices.chunks_exact(3) {
        let (ia, ib, ic) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        if ia >= vertex_count || ib >= vertex_count || ic >= vertex_count {
            continue;
        }
        let a = mesh.vertices[ia];
        let b = mesh.vertices[ib];
        let c = mesh.vertices[ic];
        let face = (b - a).cross(c - a);
        if face.magnitude2() <= 0.0 {
            continue;
        }
        let face = face.normalize();
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }

    for normal in &mut normals {
        if normal.magnitude2() > 0.0 {
            *normal = normal.normalize();
        }
    }

    normals
}

/// Generates fallback planar UVs from the mesh's XY bounding box.
///
/// `u = (x - minX) / max(rangeX, 1e-6)` and likewise for `v` over Y, so a
/// degenerate (flat) extent cannot divide by zero.
pub fn planar_uvs(mesh: &Mesh) -> Vec<[f32; 2]> {
    if mesh.vertices.is_empty() {
        return Vec::new();
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for v in &mesh.vertices {
        min_x = min_x.min(v.x);
        max_x = max_x.max(v.x);
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }
    let range_x = (max_x - min_x).max(1e-6);
    let range_y = (max_y - min_y).max(1e-6);

    mesh.vertices
        .iter()
        .map(|v| [(v.x - min_x) / range_x, (v.y - min_y) / range_y])
        .collect()
}

/// Returns the mesh's indices with every triangle that references an
/// out-of-range vertex dropped.
///
/// The silent-skip policy applied at the upload boundary: the rest of the
/// mesh still draws.
pub fn valid_triangle_indices(mesh: &Mesh) -> Vec<u32> {
    let vertex_count = mesh.vertices.len() as u32;
    mesh.indices
        .chunks_exact(3)
        .filter(|triangle| triangle.iter().all(|&i| i < vertex_count))
        .flatten()
        .copied()
        .collect()
}

/// Interleaves positions with derived normals and fallback UVs into the lit
/// pipeline's vertex format.
pub fn mesh_vertices(mesh: &Mesh) -> Vec<MeshVertex> {
    let normals = averaged_vertex_normals(mesh);
    let uvs = planar_uvs(mesh);
    mesh.vertices
        .iter()
        .zip(normals.iter())
        .zip(uvs.iter())
        .map(|((position, normal), uv)| MeshVertex {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            uv: *uv,
        })
        .collect()
}

/// Shader-visible light arrays: positions with intensity in `w`, colors, and
/// the number of populated slots.
#[derive(Debug, Clone, Copy)]
pub struct PackedLights {
    pub position_intensity: [[f32; 4]; MAX_SHADER_LIGHTS],
    pub color: [[f32; 4]; MAX_SHADER_LIGHTS],
    pub count: u32,
}

/// Packs up to the first [`MAX_SHADER_LIGHTS`] lights in iteration order.
/// Excess lights are silently ignored.
///
/// Both light kinds pack their stored position: the shading model treats
/// directional lights as positional as well.
pub fn pack_lights(lights: &[&Light]) -> PackedLights {
    let mut packed = PackedLights {
        position_intensity: [[0.0; 4]; MAX_SHADER_LIGHTS],
        color: [[0.0; 4]; MAX_SHADER_LIGHTS],
        count: lights.len().min(MAX_SHADER_LIGHTS) as u32,
    };
    for (slot, light) in lights.iter().take(MAX_SHADER_LIGHTS).enumerate() {
        packed.position_intensity[slot] = [
            light.position.x,
            light.position.y,
            light.position.z,
            light.intensity,
        ];
        packed.color[slot] = light.color.to_array();
    }
    packed
}

/// Line vertices for the three world axes with simple two-segment arrowheads,
/// colored red (X), green (Y) and blue (Z).
pub fn axis_lines() -> Vec<LineVertex> {
    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    let len = AXIS_LENGTH;
    let arrow = ARROW_SIZE;
    let half = arrow * 0.5;

    #[rustfmt::skip]
    let segments: [([f32; 3], [f32; 3], [f32; 4]); 9] = [
        ([0.0, 0.0, 0.0], [len, 0.0, 0.0], RED),
        ([len, 0.0, 0.0], [len - arrow,  half, 0.0], RED),
        ([len, 0.0, 0.0], [len - arrow, -half, 0.0], RED),
        ([0.0, 0.0, 0.0], [0.0, len, 0.0], GREEN),
        ([0.0, len, 0.0], [ half, len - arrow, 0.0], GREEN),
        ([0.0, len, 0.0], [-half, len - arrow, 0.0], GREEN),
        ([0.0, 0.0, 0.0], [0.0, 0.0, len], BLUE),
        ([0.0, 0.0, len], [ half, 0.0, len - arrow], BLUE),
        ([0.0, 0.0, len], [-half, 0.0, len - arrow], BLUE),
    ];

    segments
        .iter()
        .flat_map(|&(from, to, color)| {
            [
                LineVertex {
                    position: from,
                    color,
                },
                LineVertex {
                    position: to,
                    color,
                },
            ]
        })
        .collect()
}

/// Builds one screen-facing quad (two triangles) per light. The quad is
/// expanded to its fixed 6-pixel footprint in the vertex shader.
///
/// The marker color is the light color scaled by intensity clamped to
/// `[0, 3]`, a purely visual cue with no physical meaning.
pub fn light_markers(lights: &[&Light]) -> Vec<MarkerVertex> {
    const CORNERS: [[f32; 2]; 6] = [
        [-1.0, -1.0],
        [1.0, -1.0],
        [1.0, 1.0],
        [-1.0, -1.0],
        [1.0, 1.0],
        [-1.0, 1.0],
    ];

    let mut vertices = Vec::with_capacity(lights.len() * CORNERS.len());
    for light in lights {
        let scale = light.intensity.clamp(0.0, 3.0);
        let color = [
            light.color.r * scale,
            light.color.g * scale,
            light.color.b * scale,
            1.0,
        ];
        let center = [light.position.x, light.position.y, light.position.z];
        for corner in CORNERS {
            vertices.push(MarkerVertex {
                center,
                corner,
                color,
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::color::Color;

    fn unit_triangle() -> Mesh {
        Mesh::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_single_triangle_normals_point_along_z() {
        let normals = averaged_vertex_normals(&unit_triangle());
        assert_eq!(normals.len(), 3);
        for n in normals {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_out_of_range_triangles_leave_zero_normals() {
        let mesh = Mesh::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 9],
        );
        let normals = averaged_vertex_normals(&mesh);
        for n in normals {
            assert_eq!(n, Vector3::zero());
        }
    }

    #[test]
    fn test_planar_uvs_span_unit_square() {
        let uvs = planar_uvs(&unit_triangle());
        assert_eq!(uvs[0], [0.0, 0.0]);
        assert_eq!(uvs[1], [1.0, 0.0]);
        assert_eq!(uvs[2], [0.0, 1.0]);
    }

    #[test]
    fn test_planar_uvs_guard_degenerate_extent() {
        // All vertices share the same XY footprint; the 1e-6 floor keeps the
        // division finite.
        let mesh = Mesh::new(
            vec![Vector3::new(2.0, 3.0, 0.0), Vector3::new(2.0, 3.0, 5.0)],
            vec![],
        );
        let uvs = planar_uvs(&mesh);
        assert!(uvs.iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn test_valid_triangle_indices_drop_bad_triangles() {
        let mesh = Mesh::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1, 7],
        );
        assert_eq!(valid_triangle_indices(&mesh), vec![0, 1, 2]);
    }

    #[test]
    fn test_pack_lights_caps_at_shader_limit() {
        let lights: Vec<Light> = (0..20)
            .map(|i| {
                Light::point(
                    Vector3::new(i as f32, 0.0, 0.0),
                    i as f32,
                    Color::WHITE,
                )
            })
            .collect();
        let refs: Vec<&Light> = lights.iter().collect();
        let packed = pack_lights(&refs);
        assert_eq!(packed.count, MAX_SHADER_LIGHTS as u32);
        assert_eq!(packed.position_intensity[0][0], 0.0);
        assert_eq!(packed.position_intensity[15][0], 15.0);
        assert_eq!(packed.position_intensity[15][3], 15.0);
    }

    #[test]
    fn test_marker_color_scales_with_clamped_intensity() {
        let dim = Light::point(Vector3::new(0.0, 0.0, 0.0), -2.0, Color::WHITE);
        let hot = Light::point(Vector3::new(0.0, 0.0, 0.0), 10.0, Color::rgb(0.5, 0.5, 0.5));
        let markers = light_markers(&[&dim, &hot]);
        assert_eq!(markers.len(), 12);
        assert_eq!(markers[0].color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(markers[6].color, [1.5, 1.5, 1.5, 1.0]);
    }

    #[test]
    fn test_axis_lines_layout() {
        let lines = axis_lines();
        assert_eq!(lines.len(), 18);
        // Main lines reach the axis length.
        assert_eq!(lines[1].position, [AXIS_LENGTH, 0.0, 0.0]);
        assert_eq!(lines[7].position, [0.0, AXIS_LENGTH, 0.0]);
        assert_eq!(lines[13].position, [0.0, 0.0, AXIS_LENGTH]);
        // One color per axis.
        assert!(lines[0..6].iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
        assert!(lines[6..12].iter().all(|v| v.color == [0.0, 1.0, 0.0, 1.0]));
        assert!(lines[12..18].iter().all(|v| v.color == [0.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_mesh_vertices_interleave_all_attributes() {
        let vertices = mesh_vertices(&unit_triangle());
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[1].uv, [1.0, 0.0]);
    }
}
