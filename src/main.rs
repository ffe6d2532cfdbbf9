use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use avatar_flight::app::AppState;
use avatar_flight::cli::Cli;
use avatar_flight::config::AppConfig;
use avatar_flight::core::{Clock, Overlay, SurfaceRenderer, Throttled, WinitController};
use avatar_flight::headless;
use avatar_flight::render::{Hud, Scene};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const STATUS_LOG_INTERVAL: f32 = 5.0;

struct App {
    cli: Cli,
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    hud: Option<Hud>,
    scene: Option<Scene>,
    state: AppState,
    input: WinitController,
    clock: Clock,
    status_log: Throttled,
}

impl App {
    fn new(cli: Cli, config: AppConfig) -> Self {
        let state = AppState::new(&config, config.window.height as f32);
        Self {
            cli,
            config,
            window: None,
            renderer: None,
            hud: None,
            scene: None,
            state,
            input: WinitController::new(),
            clock: Clock::new(),
            status_log: Throttled::new(STATUS_LOG_INTERVAL),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        if let Some(scene) = &mut self.scene {
            scene.resize(width, height);
        }
        self.state.resize(height as f32);
    }

    fn redraw(&mut self) {
        let (elapsed, delta) = self.clock.tick();
        let frame = self
            .state
            .update(&self.input, self.input.scroll_lines(), elapsed, delta);
        self.input.reset_deltas();

        if self.status_log.try_tick(delta) {
            let pos = self.state.flight().state().position;
            log::info!(
                "{:.0} fps, progress {:.2}, avatar at ({:.2}, {:.2}, {:.2})",
                self.state.fps(),
                frame.progress,
                pos.x,
                pos.y,
                pos.z
            );
        }

        let (Some(renderer), Some(scene), Some(window)) =
            (&mut self.renderer, &mut self.scene, &self.window)
        else {
            return;
        };

        if let Some(hud) = &mut self.hud {
            hud.set_model(self.state.hud_model());
        }

        let canvas = scene.render(&frame);
        let overlay = self.hud.as_mut().map(|hud| hud as &mut dyn Overlay);
        if let Err(e) = renderer.present(canvas.as_bytes(), overlay, window) {
            log::error!("Render error: {}", e);
        }

        if let Some(hud) = &mut self.hud {
            for action in hud.take_actions() {
                self.state.apply(action);
            }
        }
    }

    fn pointer_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                let Some((x, y)) = self.input.cursor() else {
                    return;
                };
                let viewer = self.scene.as_ref().and_then(|scene| scene.viewer_bounds());
                self.state.pointer_pressed(Vec2::new(x, y), viewer);
            }
            ElementState::Released => self.state.pointer_released(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.clock.resume();
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window.title.clone())
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        if !self.cli.no_ui {
            self.hud = Some(Hud::new(&window, renderer.gpu(), renderer.format()));
        }
        self.scene = Some(Scene::new(width, height));
        self.state.resize(height as f32);
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.clock.resume();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(hud), Some(window)) = (&mut self.hud, &self.window) {
            if hud.on_window_event(window, &event) {
                return;
            }
        }

        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.state.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.pointer_button(state),
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::RedrawRequested => self.redraw(),
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
    // Suppress noisy GPU backend logs by default; honor RUST_LOG if set.
    let default = "info,wgpu_hal=off,wgpu_core=off,wgpu=off,naga=off";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    if let Some(frames) = cli.headless {
        let records = headless::run(&config, cli.fps, frames);
        headless::write_trace(&records, std::io::stdout().lock())?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(cli, config);

    log::info!(
        "Scroll: wheel, arrows, PageUp/PageDown, Space, Home/End. M mute, B music, N menu, Escape quits"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
