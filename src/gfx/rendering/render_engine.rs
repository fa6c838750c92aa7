//! WGPU-based forward renderer for the viewer.
//!
//! Draws the per-frame sequence the shell asks for: clear, debug axes, light
//! markers, then every model's first mesh with per-fragment multi-light
//! Lambert shading and an optional cached diffuse texture.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::gfx::camera::Camera;
use crate::gfx::scene::Model;

use super::frame_data::{self, LineVertex, MarkerVertex, MeshVertex, MAX_SHADER_LIGHTS};
use super::texture_cache::TextureCache;
use super::FrameScene;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Flat base color applied to every lit mesh. There is no per-model color in
/// the draw path yet; materials are carried by the scene and its persistence.
const MESH_BASE_COLOR: [f32; 4] = [0.7, 0.7, 0.75, 1.0];
const MESH_AMBIENT: f32 = 0.2;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-frame global uniform. Must match `FrameUniform` in both shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniform {
    view_proj: [[f32; 4]; 4],
    light_position_intensity: [[f32; 4]; MAX_SHADER_LIGHTS],
    light_color: [[f32; 4]; MAX_SHADER_LIGHTS],
    viewport: [f32; 2],
    light_count: u32,
    _pad: u32,
}

/// Per-draw uniform. Must match `DrawUniform` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniform {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    ambient: f32,
    use_texture: u32,
    _pad: [u32; 2],
}

/// GPU resources created lazily on the first `render_scene` call.
///
/// Their presence is the renderer's Ready state; see [`Renderer`].
struct SceneResources {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    draw_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    axes_buffer: wgpu::Buffer,
    axes_vertex_count: u32,
    /// 1x1 white fallback bound when a model has no usable texture, so the
    /// mesh pipeline layout never changes.
    white_bind_group: wgpu::BindGroup,
}

/// One prepared mesh draw: buffers uploaded, uniforms bound.
struct MeshDraw {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    draw_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
}

/// Forward renderer bound to one window surface.
///
/// Lifecycle is a two-state machine, **Uninitialized → Ready**: surface,
/// device and queue exist from construction, but the scene pipelines, the
/// static axes buffer and the fallback texture are created once on the first
/// [`render_scene`](Self::render_scene) call and never torn down.
/// [`clear_textures`](Self::clear_textures) only affects the texture
/// sub-resource and is safe in either state.
///
/// The renderer holds no scene references between frames; the shell rebuilds
/// a [`FrameScene`] borrow-set for every frame it wants drawn.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    scene_resources: Option<SceneResources>,
    textures: TextureCache,
}

impl Renderer {
    /// Creates a renderer for the given window surface.
    ///
    /// Initializes wgpu with default settings and configures the surface at
    /// the given size (floored to 1x1). Pipeline setup is deferred to the
    /// first rendered frame.
    ///
    /// # Panics
    /// Panics if no wgpu adapter or device is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Renderer {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .expect("Failed to request a device!");

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        Renderer {
            surface,
            device,
            queue,
            config,
            depth_view,
            scene_resources: None,
            textures: TextureCache::new(),
        }
    }

    /// Resizes the render surface, flooring both dimensions to 1, and
    /// recreates the depth buffer to match.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Current surface dimensions.
    pub fn viewport_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Releases every cached texture handle.
    ///
    /// Idempotent and callable at any time, including before the first frame.
    /// Must be called before reloading a scene whose texture paths may now
    /// point at different image content.
    pub fn clear_textures(&mut self) {
        self.textures.clear();
    }

    /// Number of live texture cache entries.
    pub fn cached_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Renders one frame of the given scene view.
    ///
    /// Draw sequence: clear, debug axes, one unlit marker per light, then
    /// each model's first mesh, lit by up to the first 16 lights. Models with
    /// fewer than 3 vertices or indices are skipped, as are triangles whose
    /// indices fall outside the vertex list. Without a camera both matrices
    /// are identity.
    pub fn render_scene(&mut self, frame: &FrameScene) -> Result<(), wgpu::SurfaceError> {
        if self.scene_resources.is_none() {
            self.scene_resources = Some(SceneResources::new(
                &self.device,
                &self.queue,
                self.config.format,
            ));
        }
        let resources = self
            .scene_resources
            .as_ref()
            .expect("scene resources just initialized");

        let output = self.surface.get_current_texture()?;
        let output_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Frame-global uniform: matrices plus the packed light arrays.
        let view_proj = view_projection(
            frame.camera(),
            self.config.width as f32,
            self.config.height as f32,
        );
        let packed = frame_data::pack_lights(frame.lights());
        let frame_uniform = FrameUniform {
            view_proj: view_proj.into(),
            light_position_intensity: packed.position_intensity,
            light_color: packed.color,
            viewport: [self.config.width as f32, self.config.height as f32],
            light_count: packed.count,
            _pad: 0,
        };
        self.queue
            .write_buffer(&resources.frame_buffer, 0, bytemuck::bytes_of(&frame_uniform));

        let markers = marker_buffer(&self.device, frame);
        let mesh_draws = prepare_mesh_draws(
            &self.device,
            &self.queue,
            &mut self.textures,
            resources,
            frame.models(),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &resources.frame_bind_group, &[]);

            // Debug axes.
            pass.set_pipeline(&resources.line_pipeline);
            pass.set_vertex_buffer(0, resources.axes_buffer.slice(..));
            pass.draw(0..resources.axes_vertex_count, 0..1);

            // Light markers.
            if let Some((buffer, vertex_count)) = &markers {
                pass.set_pipeline(&resources.marker_pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..*vertex_count, 0..1);
            }

            // Lit meshes.
            pass.set_pipeline(&resources.mesh_pipeline);
            for draw in &mesh_draws {
                pass.set_bind_group(1, &draw.draw_bind_group, &[]);
                pass.set_bind_group(2, &draw.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                pass.set_index_buffer(draw.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Builds the combined view-projection matrix, or identity without a camera.
///
/// Projection uses the camera fov with near 0.1 / far 500 and the viewport
/// aspect ratio (1.0 when the height is not positive); the view matrix looks
/// from the camera position toward position + forward with world up.
fn view_projection(camera: Option<&Camera>, width: f32, height: f32) -> Matrix4<f32> {
    let Some(camera) = camera else {
        return Matrix4::identity();
    };
    let aspect = if height > 0.0 { width / height } else { 1.0 };
    let projection =
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(Deg(camera.fov), aspect, Z_NEAR, Z_FAR);

    let eye = Point3::from_vec(camera.position);
    let target = Point3::from_vec(camera.position + camera.basis().forward);
    let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());

    projection * view
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Per-frame vertex buffer for the light markers, `None` when there are no
/// lights to mark.
fn marker_buffer(device: &wgpu::Device, frame: &FrameScene) -> Option<(wgpu::Buffer, u32)> {
    let vertices = frame_data::light_markers(frame.lights());
    if vertices.is_empty() {
        return None;
    }
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Marker Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    Some((buffer, vertices.len() as u32))
}

/// Uploads vertex/index/uniform data for every drawable model.
///
/// Only the first mesh of each model is considered. Meshes with fewer than 3
/// vertices or 3 indices are skipped, and triangles referencing out-of-range
/// vertices are dropped before upload.
fn prepare_mesh_draws(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    textures: &mut TextureCache,
    resources: &SceneResources,
    models: &[&Model],
) -> Vec<MeshDraw> {
    let mut draws = Vec::new();
    for model in models {
        let Some(mesh) = model.meshes.first() else {
            continue;
        };
        if mesh.vertices.len() < 3 || mesh.indices.len() < 3 {
            continue;
        }
        let indices = frame_data::valid_triangle_indices(mesh);
        if indices.is_empty() {
            continue;
        }
        let vertices = frame_data::mesh_vertices(mesh);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&model.name),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&model.name),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let texture_bind_group = if model.texture.loaded {
            textures.bind_if_available(
                device,
                queue,
                &resources.texture_layout,
                &model.texture.file,
            )
        } else {
            None
        };
        let use_texture = texture_bind_group.is_some();

        let draw_uniform = DrawUniform {
            // No per-model transform exists yet.
            model: Matrix4::identity().into(),
            base_color: MESH_BASE_COLOR,
            ambient: MESH_AMBIENT,
            use_texture: use_texture as u32,
            _pad: [0; 2],
        };
        let draw_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&model.name),
            contents: bytemuck::bytes_of(&draw_uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&model.name),
            layout: &resources.draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: draw_buffer.as_entire_binding(),
            }],
        });

        draws.push(MeshDraw {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            draw_bind_group,
            texture_bind_group: texture_bind_group
                .unwrap_or_else(|| resources.white_bind_group.clone()),
        });
    }
    draws
}

impl SceneResources {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let unlit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Unlit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("unlit.wgsl").into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Bind Group Layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let axes = frame_data::axis_lines();
        let axes_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axes Buffer"),
            contents: bytemuck::cast_slice(&axes),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mesh_pipeline = {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&frame_layout, &draw_layout, &texture_layout],
                push_constant_ranges: &[],
            });
            create_pipeline(
                device,
                "Mesh Pipeline",
                &layout,
                &scene_shader,
                "vs_main",
                &[MeshVertex::desc()],
                wgpu::PrimitiveTopology::TriangleList,
                format,
            )
        };

        let unlit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Unlit Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });
        let line_pipeline = create_pipeline(
            device,
            "Line Pipeline",
            &unlit_layout,
            &unlit_shader,
            "vs_line",
            &[LineVertex::desc()],
            wgpu::PrimitiveTopology::LineList,
            format,
        );
        let marker_pipeline = create_pipeline(
            device,
            "Marker Pipeline",
            &unlit_layout,
            &unlit_shader,
            "vs_marker",
            &[MarkerVertex::desc()],
            wgpu::PrimitiveTopology::TriangleList,
            format,
        );

        let white_bind_group = create_white_bind_group(device, queue, &texture_layout);

        Self {
            mesh_pipeline,
            line_pipeline,
            marker_pipeline,
            texture_layout,
            draw_layout,
            frame_buffer,
            frame_bind_group,
            axes_buffer,
            axes_vertex_count: axes.len() as u32,
            white_bind_group,
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Shared render pipeline shape: depth tested, no face culling so both
/// winding orders stay visible (back faces are lit via the shader's normal
/// flip instead).
fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_entry: &str,
    vertex_buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vertex_entry),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: vertex_buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_white_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: 1,
        height: 1,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("White Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[255u8; 4],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("White Texture Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_no_camera_yields_identity() {
        let matrix = view_projection(None, 800.0, 600.0);
        assert_eq!(matrix, Matrix4::identity());
    }

    #[test]
    fn test_view_projection_centers_the_look_target() {
        // A point straight ahead of the camera projects onto the view axis:
        // x and y vanish in clip space.
        let camera = Camera::default();
        let matrix = view_projection(Some(&camera), 800.0, 600.0);
        let ahead = camera.position + camera.basis().forward * 10.0;
        let clip = matrix * Vector4::new(ahead.x, ahead.y, ahead.z, 1.0);
        assert!(clip.x.abs() < 1e-4);
        assert!(clip.y.abs() < 1e-4);
        assert!(clip.w > 0.0);
    }

    #[test]
    fn test_zero_height_viewport_falls_back_to_square_aspect() {
        let camera = Camera::default();
        let square = view_projection(Some(&camera), 512.0, 512.0);
        let degenerate = view_projection(Some(&camera), 512.0, 0.0);
        assert_eq!(square, degenerate);
    }
}
