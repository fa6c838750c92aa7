//! Sample shape construction.
//!
//! Each function builds a single-mesh model and appends it to the scene,
//! returning the fail-soft result of `Scene::add_model`. Placement uses the
//! camera basis so the shape lands centered in view at a fixed distance.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::gfx::camera::Camera;
use crate::gfx::scene::{Mesh, Model, Scene};

/// Point a fixed distance in front of the camera.
fn forward_center(camera: &Camera, distance: f32) -> Vector3<f32> {
    camera.position + camera.basis().forward * distance
}

/// A single camera-facing triangle five units ahead.
pub fn add_triangle_sample(scene: &mut Scene) -> bool {
    let basis = scene.camera.basis();
    let center = forward_center(&scene.camera, 5.0);
    let (sx, sy, su) = (0.6, 0.5, 0.6);

    let vertices = vec![
        center - basis.right * sx - basis.up * sy,
        center + basis.right * sx - basis.up * sy,
        center + basis.up * su,
    ];
    scene.add_model(Model::with_mesh("Triangle", Mesh::new(vertices, vec![0, 1, 2])))
}

/// A unit cube three units ahead, aligned to the camera basis.
pub fn add_cube_sample(scene: &mut Scene) -> bool {
    let basis = scene.camera.basis();
    let center = forward_center(&scene.camera, 3.0);
    let half = 0.5;
    let (rx, uy, fz) = (basis.right * half, basis.up * half, basis.forward * half);

    let vertices = vec![
        center - rx - uy - fz,
        center + rx - uy - fz,
        center + rx + uy - fz,
        center - rx + uy - fz,
        center - rx - uy + fz,
        center + rx - uy + fz,
        center + rx + uy + fz,
        center - rx + uy + fz,
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  0, 2, 3,
        4, 6, 5,  4, 7, 6,
        0, 4, 5,  0, 5, 1,
        3, 2, 6,  3, 6, 7,
        0, 3, 7,  0, 7, 4,
        1, 5, 6,  1, 6, 2,
    ];
    scene.add_model(Model::with_mesh("Cube", Mesh::new(vertices, indices)))
}

/// A square-based pyramid three units ahead, base aligned to the world axes.
pub fn add_pyramid_sample(scene: &mut Scene) -> bool {
    let center = forward_center(&scene.camera, 3.0);
    let half = 0.5;
    let height = 0.9;

    let hr = Vector3::new(half, 0.0, 0.0);
    let hf = Vector3::new(0.0, 0.0, half);
    let apex = center + Vector3::new(0.0, height, 0.0);

    let vertices = vec![
        center - hr - hf,
        center + hr - hf,
        center + hr + hf,
        center - hr + hf,
        apex,
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  0, 2, 3,
        0, 1, 4,  1, 2, 4,
        2, 3, 4,  3, 0, 4,
    ];
    scene.add_model(Model::with_mesh("Pyramid", Mesh::new(vertices, indices)))
}

/// A UV sphere (12 stacks x 18 slices) three units ahead, oriented along the
/// camera basis.
pub fn add_sphere_sample(scene: &mut Scene) -> bool {
    let basis = scene.camera.basis();
    let center = forward_center(&scene.camera, 3.0);
    let radius = 0.7;
    let stacks = 12u32;
    let slices = 18u32;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        let y = phi.cos();
        let ring = phi.sin();
        for j in 0..=slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let x = theta.cos() * ring;
            let z = theta.sin() * ring;
            vertices.push(
                center
                    + basis.right * (radius * x)
                    + basis.up * (radius * y)
                    + basis.forward * (radius * z),
            );
        }
    }

    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;
            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    scene.add_model(Model::with_mesh("Sphere", Mesh::new(vertices, indices)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_triangle_sample_lands_in_front_of_camera() {
        let mut scene = Scene::new();
        assert!(add_triangle_sample(&mut scene));
        let mesh = &scene.models()[0].meshes[0];
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);

        // All vertices sit near the point five units down the view direction.
        let expected = forward_center(&scene.camera, 5.0);
        for v in &mesh.vertices {
            assert!((v - expected).magnitude() < 1.0);
        }
    }

    #[test]
    fn test_cube_sample_topology() {
        let mut scene = Scene::new();
        assert!(add_cube_sample(&mut scene));
        let mesh = &scene.models()[0].meshes[0];
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_sphere_sample_topology() {
        let mut scene = Scene::new();
        assert!(add_sphere_sample(&mut scene));
        let mesh = &scene.models()[0].meshes[0];
        assert_eq!(mesh.vertex_count(), 13 * 19);
        assert_eq!(mesh.triangle_count(), (12 * 18 * 2) as usize);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));

        // Every vertex lies on the sphere surface.
        let center = forward_center(&scene.camera, 3.0);
        for v in &mesh.vertices {
            assert!(((v - center).magnitude() - 0.7).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pyramid_sample_topology() {
        let mut scene = Scene::new();
        assert!(add_pyramid_sample(&mut scene));
        let mesh = &scene.models()[0].meshes[0];
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 6);
    }
}
