use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tileflip_input::{Action, PointerButton, PointerTracker};
use tileflip_render_wgpu::{GpuContext, OrbitCamera, TileRenderer};
use tileflip_scene::{Choreography, Scene, SceneConfig};
use tileflip_timeline::FrameTimer;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Longest frame step fed to the animation, so a stall does not jump it.
const MAX_FRAME_DT: f32 = 0.1;
/// Pixels per wheel line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "tileflip-desktop", about = "Animated tile grid with an orbit camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Everything a frame reads or writes, owned by the event loop.
struct AppState {
    config: SceneConfig,
    scene: Scene,
    choreography: Choreography,
    camera: OrbitCamera,
    pointer: PointerTracker,
    frames: FrameTimer,
    last_frame: Instant,
    viewport_height: f32,
}

impl AppState {
    fn new(config: SceneConfig) -> Result<Self> {
        let (layout, scene, choreography) = config
            .build()
            .context("invalid scene configuration")?;
        tracing::info!(tiles = layout.len(), "scene ready");

        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = OrbitCamera::from_config(&config.camera, aspect);
        let viewport_height = config.window.height as f32;

        Ok(Self {
            config,
            scene,
            choreography,
            camera,
            pointer: PointerTracker::new(),
            frames: FrameTimer::new(120),
            last_frame: Instant::now(),
            viewport_height,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.viewport_height = height.max(1) as f32;
    }

    fn update(&mut self, dt: f32) {
        self.choreography.advance(&mut self.scene, dt);
        self.camera.update();

        let eye = self.camera.eye();
        tracing::trace!(x = eye.x, y = eye.y, z = eye.z, "camera position");

        self.frames.record(Duration::from_secs_f32(dt));
        if self.frames.window_complete() {
            tracing::debug!(
                fps = self.frames.fps(),
                worst_ms = self.frames.max().as_secs_f32() * 1000.0,
                "frame timing"
            );
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Orbit { dx, dy } => self.camera.orbit(dx, dy, self.viewport_height),
            Action::Pan { dx, dy } => self.camera.pan(dx, dy, self.viewport_height),
            Action::Dolly(steps) => self.camera.dolly(steps),
            Action::Noop => {}
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<TileRenderer>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            gpu: None,
            renderer: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        let renderer = TileRenderer::new(&gpu.device, gpu.format(), size.width, size.height);
        self.state.resize(size.width, size.height);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.state.last_frame = now;
        self.state.update(dt);

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };

        let output = match gpu.acquire() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &self.state.scene,
            self.state.scene.background(),
        );
        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    self.state.resize(width, height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, width, height);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = pointer_button(button) {
                    match state {
                        ElementState::Pressed => self.state.pointer.press(button),
                        ElementState::Released => self.state.pointer.release(button),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .pointer
                    .moved(position.x as f32, position.y as f32);
                self.state.apply(action);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer.reset();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                let action = self.state.pointer.wheel(lines);
                self.state.apply(action);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("tileflip-desktop starting");

    let state = AppState::new(SceneConfig::default())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_from_default_config() {
        let state = AppState::new(SceneConfig::default()).unwrap();
        assert_eq!(state.scene.tile_count(), 225);
        assert_eq!(state.viewport_height, 720.0);
        assert!((state.camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn update_advances_animation() {
        let mut state = AppState::new(SceneConfig::default()).unwrap();
        state.update(0.25);
        assert!((state.choreography.elapsed() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn drag_orbits_camera() {
        let mut state = AppState::new(SceneConfig::default()).unwrap();
        state.camera.enable_damping = false;
        let before = state.camera.eye();
        state.pointer.moved(100.0, 100.0);
        state.pointer.press(PointerButton::Primary);
        let action = state.pointer.moved(160.0, 100.0);
        state.apply(action);
        state.camera.update();
        assert!((state.camera.eye() - before).length() > 1.0);
    }

    #[test]
    fn buttons_map_to_pointer_buttons() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Back), None);
    }
}
