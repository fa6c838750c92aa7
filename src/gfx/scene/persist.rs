//! Line-oriented text persistence for scenes.
//!
//! The format is newline-separated with whitespace-tokenized fields and no
//! escaping:
//!
//! ```text
//! CAMERA <posX> <posY> <posZ> <yaw> <pitch> <fov>
//! LIGHTS <count>
//! LIGHT <type:0|1> <posX> <posY> <posZ> <dirX> <dirY> <dirZ> <r> <g> <b> <a> <intensity>
//! MODELS <count>
//! NAME <name>
//! TEXTURE <path-or-'-'>
//! MATERIAL <r> <g> <b> <a>
//! MESHES <meshCount>
//! VERTICES <n>
//! v <x> <y> <z>
//! INDICES <n>
//! i <index>
//! ```
//!
//! Reading is deliberately tolerant: a short or malformed record stops the
//! affected inner loop early and keeps whatever already parsed, rather than
//! failing the load. The caller signals failure only when the file cannot be
//! opened at all.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use cgmath::Vector3;
use thiserror::Error;

use crate::gfx::lighting::{Light, LightKind};

use super::mesh::Mesh;
use super::model::Model;
use super::scene::Scene;

/// I/O-level failures of scene persistence.
///
/// Malformed or truncated file contents are not an error; see the module
/// docs.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to open scene file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create scene file {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write scene file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Pulls lines off a reader, treating a read error like end of input.
struct LineSource<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    fn next(&mut self) -> Option<String> {
        self.lines.next().and_then(Result::ok)
    }
}

fn next_f32<'a>(tokens: &mut impl Iterator<Item = &'a str>, default: f32) -> f32 {
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(default)
}

fn next_u32<'a>(tokens: &mut impl Iterator<Item = &'a str>, default: u32) -> u32 {
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(default)
}

fn count_after(line: &str, key: &str) -> usize {
    line.strip_prefix(key)
        .and_then(|rest| rest.trim().parse().ok())
        .unwrap_or(0)
}

/// Parses a scene body into `scene`, which the caller has already cleared.
///
/// The CAMERA line is recognized and skipped without touching the live
/// camera. Adds past the scene's capacity ceilings are silently dropped.
pub(crate) fn read_scene(reader: impl BufRead, scene: &mut Scene) {
    let mut lines = LineSource::new(reader);

    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            // The camera in the file is informational; the live camera keeps
            // its pose across a load.
            Some("CAMERA") => {}
            Some("LIGHTS") => {
                let count = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
                read_lights(&mut lines, scene, count);
            }
            Some("MODELS") => {
                let count = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
                read_models(&mut lines, scene, count);
            }
            _ => {}
        }
    }
}

fn read_lights(lines: &mut LineSource<impl BufRead>, scene: &mut Scene, count: usize) {
    let mut parsed = 0;
    while parsed < count {
        let Some(line) = lines.next() else { break };
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("LIGHT") {
            continue;
        }

        let mut light = Light::default();
        light.kind = if next_u32(&mut tokens, 0) == 1 {
            LightKind::Directional
        } else {
            LightKind::Point
        };
        light.position = Vector3::new(
            next_f32(&mut tokens, 0.0),
            next_f32(&mut tokens, 0.0),
            next_f32(&mut tokens, 0.0),
        );
        light.direction = Vector3::new(
            next_f32(&mut tokens, light.direction.x),
            next_f32(&mut tokens, light.direction.y),
            next_f32(&mut tokens, light.direction.z),
        );
        light.color.r = next_f32(&mut tokens, light.color.r);
        light.color.g = next_f32(&mut tokens, light.color.g);
        light.color.b = next_f32(&mut tokens, light.color.b);
        light.color.a = next_f32(&mut tokens, light.color.a);
        light.intensity = next_f32(&mut tokens, light.intensity);

        scene.add_light(light);
        parsed += 1;
    }
}

fn read_models(lines: &mut LineSource<impl BufRead>, scene: &mut Scene, count: usize) {
    for index in 0..count {
        let Some(line) = lines.next() else { break };
        let name = match line.strip_prefix("NAME") {
            Some(rest) => rest.trim().to_string(),
            None => format!("model{index}"),
        };
        let mut model = Model::new(name);

        if let Some(line) = lines.next() {
            if let Some(rest) = line.strip_prefix("TEXTURE") {
                let value = rest.trim();
                if value != "-" && !value.is_empty() {
                    model.apply_texture(value);
                }
            }
        }

        if let Some(line) = lines.next() {
            if let Some(rest) = line.strip_prefix("MATERIAL") {
                let mut tokens = rest.split_whitespace();
                let diffuse = &mut model.material.diffuse;
                diffuse.r = next_f32(&mut tokens, diffuse.r);
                diffuse.g = next_f32(&mut tokens, diffuse.g);
                diffuse.b = next_f32(&mut tokens, diffuse.b);
                diffuse.a = next_f32(&mut tokens, diffuse.a);
            }
        }

        let mesh_count = match lines.next() {
            Some(line) => count_after(&line, "MESHES"),
            None => 0,
        };

        for _ in 0..mesh_count {
            let Some(line) = lines.next() else { break };
            let vertex_count = count_after(&line, "VERTICES");
            let mut vertices = Vec::with_capacity(vertex_count);
            for _ in 0..vertex_count {
                let Some(line) = lines.next() else { break };
                let mut tokens = line.split_whitespace();
                tokens.next(); // leading "v"
                vertices.push(Vector3::new(
                    next_f32(&mut tokens, 0.0),
                    next_f32(&mut tokens, 0.0),
                    next_f32(&mut tokens, 0.0),
                ));
            }

            let Some(line) = lines.next() else { break };
            let index_count = count_after(&line, "INDICES");
            let mut indices = Vec::with_capacity(index_count);
            for _ in 0..index_count {
                let Some(line) = lines.next() else { break };
                let mut tokens = line.split_whitespace();
                tokens.next(); // leading "i"
                indices.push(next_u32(&mut tokens, 0));
            }

            model.meshes.push(Mesh::new(vertices, indices));
        }

        scene.add_model(model);
    }
}

/// Writes the full scene in the text format above.
///
/// Floats are written with `Display` formatting, which round-trips `f32`
/// values exactly.
pub(crate) fn write_scene(writer: &mut impl Write, scene: &Scene) -> io::Result<()> {
    let camera = &scene.camera;
    writeln!(
        writer,
        "CAMERA {} {} {} {} {} {}",
        camera.position.x, camera.position.y, camera.position.z, camera.yaw, camera.pitch, camera.fov
    )?;

    writeln!(writer, "LIGHTS {}", scene.lights().len())?;
    for light in scene.lights() {
        let kind = match light.kind {
            LightKind::Point => 0,
            LightKind::Directional => 1,
        };
        writeln!(
            writer,
            "LIGHT {} {} {} {} {} {} {} {} {} {} {} {}",
            kind,
            light.position.x,
            light.position.y,
            light.position.z,
            light.direction.x,
            light.direction.y,
            light.direction.z,
            light.color.r,
            light.color.g,
            light.color.b,
            light.color.a,
            light.intensity
        )?;
    }

    writeln!(writer, "MODELS {}", scene.models().len())?;
    for model in scene.models() {
        writeln!(writer, "NAME {}", model.name)?;
        let texture = if model.texture.file.is_empty() {
            "-"
        } else {
            model.texture.file.as_str()
        };
        writeln!(writer, "TEXTURE {}", texture)?;
        let diffuse = model.material.diffuse;
        writeln!(
            writer,
            "MATERIAL {} {} {} {}",
            diffuse.r, diffuse.g, diffuse.b, diffuse.a
        )?;
        writeln!(writer, "MESHES {}", model.meshes.len())?;
        for mesh in &model.meshes {
            writeln!(writer, "VERTICES {}", mesh.vertices.len())?;
            for v in &mesh.vertices {
                writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
            }
            writeln!(writer, "INDICES {}", mesh.indices.len())?;
            for i in &mesh.indices {
                writeln!(writer, "i {}", i)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::color::Color;
    use crate::gfx::scene::Material;

    fn triangle_model() -> Model {
        let mesh = Mesh::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        let mut model = Model::with_mesh("Triangle", mesh);
        model.material = Material {
            diffuse: Color::new(1.0, 0.0, 0.0, 1.0),
        };
        model
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut scene = Scene::new();
        scene.add_light(Light::point(
            Vector3::new(2.0, 4.0, -1.5),
            2.25,
            Color::rgb(1.0, 0.9, 0.8),
        ));
        let mut directional = Light::default();
        directional.kind = LightKind::Directional;
        directional.direction = Vector3::new(0.3, -0.8, 0.1);
        scene.add_light(directional);
        scene.add_model(triangle_model());
        scene.camera.position = Vector3::new(4.0, 3.0, 4.0);
        scene.camera.yaw = -135.0;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.scene");
        scene.save_to_file(&path).unwrap();

        let mut loaded = Scene::new();
        loaded.camera.position = Vector3::new(9.0, 9.0, 9.0);
        loaded.load_from_file(&path).unwrap();

        assert_eq!(loaded.lights().len(), 2);
        assert_eq!(loaded.models().len(), 1);
        assert_eq!(loaded.lights()[0], scene.lights()[0]);
        assert_eq!(loaded.lights()[1].kind, LightKind::Directional);
        assert_eq!(loaded.lights()[1].direction, Vector3::new(0.3, -0.8, 0.1));

        let model = &loaded.models()[0];
        assert_eq!(model.name, "Triangle");
        assert_eq!(model.material.diffuse, Color::new(1.0, 0.0, 0.0, 1.0));
        assert!(!model.texture.loaded);
        assert_eq!(model.meshes[0], scene.models()[0].meshes[0]);

        // Load must not re-apply the camera from the file.
        assert_eq!(loaded.camera.position, Vector3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn test_written_camera_line_matches_live_camera() {
        let mut scene = Scene::new();
        scene.camera.position = Vector3::new(1.5, -2.0, 0.25);
        scene.camera.yaw = 42.5;
        scene.camera.pitch = -10.0;
        scene.camera.fov = 75.0;

        let mut out = Vec::new();
        write_scene(&mut out, &scene).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("CAMERA 1.5 -2 0.25 42.5 -10 75\n"));
    }

    #[test]
    fn test_exact_output_format() {
        let mut scene = Scene::new();
        scene.add_model(triangle_model());

        let mut out = Vec::new();
        write_scene(&mut out, &scene).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "CAMERA 0 0 5 0 0 60\n\
                        LIGHTS 0\n\
                        MODELS 1\n\
                        NAME Triangle\n\
                        TEXTURE -\n\
                        MATERIAL 1 0 0 1\n\
                        MESHES 1\n\
                        VERTICES 3\n\
                        v 0 0 0\n\
                        v 1 0 0\n\
                        v 0 1 0\n\
                        INDICES 3\n\
                        i 0\n\
                        i 1\n\
                        i 2\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_truncated_lights_section_keeps_partial_scene() {
        let input = "LIGHTS 3\nLIGHT 0 1 2 3 0 -1 0 1 1 1 1 2\n";
        let mut scene = Scene::new();
        read_scene(input.as_bytes(), &mut scene);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.lights()[0].intensity, 2.0);
    }

    #[test]
    fn test_truncated_vertex_rows_keep_partial_mesh() {
        let input = "MODELS 1\n\
                     NAME Cut\n\
                     TEXTURE -\n\
                     MATERIAL 1 1 1 1\n\
                     MESHES 1\n\
                     VERTICES 5\n\
                     v 0 0 0\n\
                     v 1 0 0\n";
        let mut scene = Scene::new();
        read_scene(input.as_bytes(), &mut scene);
        // The vertex loop ran dry, then the missing INDICES line ended the
        // mesh loop: the model survives with no mesh attached.
        assert_eq!(scene.models().len(), 1);
        assert_eq!(scene.models()[0].name, "Cut");
        assert!(scene.models()[0].meshes.is_empty());
    }

    #[test]
    fn test_missing_name_falls_back_to_indexed_name() {
        let input = "MODELS 1\n\
                     something-else\n\
                     TEXTURE tex.png\n\
                     MATERIAL 0.5 0.5 0.5 1\n\
                     MESHES 0\n";
        let mut scene = Scene::new();
        read_scene(input.as_bytes(), &mut scene);
        assert_eq!(scene.models()[0].name, "model0");
        assert!(scene.models()[0].texture.loaded);
        assert_eq!(scene.models()[0].texture.file, "tex.png");
    }

    #[test]
    fn test_texture_dash_means_none() {
        let input = "MODELS 1\nNAME M\nTEXTURE -\nMATERIAL 1 1 1 1\nMESHES 0\n";
        let mut scene = Scene::new();
        read_scene(input.as_bytes(), &mut scene);
        assert!(!scene.models()[0].texture.loaded);
        assert!(scene.models()[0].texture.file.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_consume_light_slots() {
        let input = "LIGHTS 2\n\nLIGHT 0 0 0 0 0 -1 0 1 1 1 1 1\n\nLIGHT 1 0 0 0 0 -1 0 1 1 1 1 1\n";
        let mut scene = Scene::new();
        read_scene(input.as_bytes(), &mut scene);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.lights()[1].kind, LightKind::Directional);
    }
}
