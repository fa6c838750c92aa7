//! Winit application shell for the viewer.
//!
//! Owns the window, the scene and the renderer, and wires user input onto the
//! camera controller: left drag orbits, right drag pans, middle drag dollies,
//! the wheel zooms. A handful of keys cover the shell actions that menus
//! provide in a full desktop build (samples, light placement, reset,
//! load/save, clear). Frame pacing and the FPS metric live here, not in the
//! renderer.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::CameraController,
    color::Color,
    geometry,
    rendering::{FrameScene, Renderer},
    scene::{Scene, SceneError},
};

/// Scene file the shell loads at startup when present.
const DEFAULT_SCENE_PATH: &str = "data/default.scene";
/// Scene file written by the save key.
const SAVE_SCENE_PATH: &str = "saved.scene";

const FPS_LOG_INTERVAL: Duration = Duration::from_millis(500);

/// The interactive viewer application.
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Scene,
    controller: CameraController,
    cursor: Option<PhysicalPosition<f64>>,
    left_held: bool,
    right_held: bool,
    middle_held: bool,
    frames: u32,
    fps_marker: Instant,
}

impl ViewerApp {
    /// Creates the app with the default scene content.
    ///
    /// Tries `data/default.scene` first; if the scene comes up empty a sample
    /// triangle is placed in front of the home camera pose so there is always
    /// something to look at.
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut scene = Scene::new();
        let mut controller = CameraController::new();
        controller.set_home(4.0, 3.0, 4.0, -135.0, -20.0, 60.0);
        controller.reset(&mut scene.camera);

        if Path::new(DEFAULT_SCENE_PATH).is_file() {
            if let Err(err) = scene.load_from_file(DEFAULT_SCENE_PATH) {
                log::warn!("could not load default scene: {err}");
            }
        }
        if scene.models().is_empty() {
            geometry::add_triangle_sample(&mut scene);
        }

        Self {
            event_loop: Some(event_loop),
            state: AppState {
                window: None,
                renderer: None,
                scene,
                controller,
                cursor: None,
                left_held: false,
                right_held: false,
                middle_held: false,
                frames: 0,
                fps_marker: Instant::now(),
            },
        }
    }

    /// Replaces the scene contents from a scene file.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        self.state.load_scene(path.as_ref())
    }

    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.state.scene
    }

    /// Runs the event loop; consumes the app and returns on window close.
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self.state)
            .expect("Failed to run event loop");
    }
}

impl Default for ViewerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn load_scene(&mut self, path: &Path) -> Result<(), SceneError> {
        // The cache key is the texture path, not its content; a reload may
        // reuse paths for different images.
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear_textures();
        }
        self.scene.load_from_file(path)
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyR => self.controller.reset(&mut self.scene.camera),
            KeyCode::Digit1 => {
                geometry::add_triangle_sample(&mut self.scene);
            }
            KeyCode::Digit2 => {
                geometry::add_cube_sample(&mut self.scene);
            }
            KeyCode::Digit3 => {
                geometry::add_pyramid_sample(&mut self.scene);
            }
            KeyCode::Digit4 => {
                geometry::add_sphere_sample(&mut self.scene);
            }
            KeyCode::KeyL => {
                if !self.scene.place_light_here(1.0, Color::WHITE) {
                    log::info!("light limit reached");
                }
            }
            KeyCode::KeyC => {
                self.scene.clear();
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.clear_textures();
                }
            }
            KeyCode::KeyO => {
                if let Err(err) = self.load_scene(Path::new(DEFAULT_SCENE_PATH)) {
                    log::warn!("scene load failed: {err}");
                }
            }
            KeyCode::KeyS => match self.scene.save_to_file(SAVE_SCENE_PATH) {
                Ok(()) => log::info!("scene saved to {SAVE_SCENE_PATH}"),
                Err(err) => log::warn!("scene save failed: {err}"),
            },
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> bool {
        let Some(last) = self.cursor.replace(position) else {
            return false;
        };
        let dx = (position.x - last.x) as f32;
        let dy = (position.y - last.y) as f32;

        let mut moved = false;
        if self.left_held {
            self.controller.orbit_drag(&mut self.scene.camera, dx, dy);
            moved = true;
        }
        if self.right_held {
            self.controller.pan_drag(&mut self.scene.camera, dx, dy);
            moved = true;
        }
        if self.middle_held {
            self.controller.dolly_drag(&mut self.scene.camera, dy);
            moved = true;
        }
        moved
    }

    fn track_fps(&mut self) {
        self.frames += 1;
        let elapsed = self.fps_marker.elapsed();
        if elapsed >= FPS_LOG_INTERVAL {
            let fps = (self.frames as f64 / elapsed.as_secs_f64()).round();
            log::debug!("FPS: {fps}");
            self.frames = 0;
            self.fps_marker = Instant::now();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("vantage")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window = Arc::new(window);
            self.window = Some(window.clone());

            let (width, height) = window.inner_size().into();
            let renderer =
                pollster::block_on(async move { Renderer::new(window, width, height).await });
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.set_viewport_size(width, height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        self.handle_key(key, event_loop);
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let held = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.left_held = held,
                    MouseButton::Right => self.right_held = held,
                    MouseButton::Middle => self.middle_held = held,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.handle_cursor_moved(position) {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y as f32 / 120.0,
                };
                self.controller.wheel_zoom(&mut self.scene.camera, steps);
                log::debug!("zoom: x{:.1}", 60.0 / self.scene.camera.fov);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                let frame = FrameScene::from_scene(&self.scene);
                match renderer.render_scene(&frame) {
                    Ok(()) => self.track_fps(),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (width, height) = window.inner_size().into();
                        renderer.set_viewport_size(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory, exiting");
                        event_loop.exit();
                    }
                    Err(err) => log::warn!("frame skipped: {err}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
