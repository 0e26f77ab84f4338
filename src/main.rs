//! LearnOpenGL slideshow
//!
//! Arrow keys (or Page Up/Down, Home, End) move through the tutorials. Camera
//! slides capture the mouse on click; Escape releases it, and exits when
//! nothing is captured.

use std::fmt::Display;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use learngfx::config::AppConfig;
use learngfx::input::{InputAction, InputMapper};
use learngfx::slides::build_deck;
use learngfx::systems::{RenderError, RenderSystem, WindowSystem};
use learngfx_core::{DeckCommand, FpsCounter, FrameClock};
use learngfx_input::SketchEvent;
use learngfx_render::GpuDeck;

/// Pixel deltas are converted to lines at this rate
const PIXELS_PER_LINE: f32 = 100.0;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    deck: GpuDeck,
    clock: FrameClock,
    fps: FpsCounter,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let deck = build_deck(&config);
        log::info!("Built deck with {} slides", deck.len());

        Self {
            config,
            window: None,
            render: None,
            deck,
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
        }
    }

    fn cursor_captured(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.is_cursor_captured())
    }

    fn current_is_sketch(&self) -> bool {
        self.deck.current().is_some_and(|s| s.is_sketch())
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::NextSlide => self.navigate(DeckCommand::Next),
            InputAction::PreviousSlide => self.navigate(DeckCommand::Previous),
            InputAction::FirstSlide => self.navigate(DeckCommand::First),
            InputAction::LastSlide => self.navigate(DeckCommand::Last),
            InputAction::ToggleCursor => {
                let captured = self.cursor_captured();
                if let Some(window) = &mut self.window {
                    if captured {
                        window.release_cursor();
                    } else if self.deck.current().is_some_and(|s| s.is_sketch()) {
                        window.capture_cursor();
                    }
                }
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
        }
    }

    fn navigate(&mut self, command: DeckCommand) {
        if !self.deck.apply(command) {
            return;
        }
        // Only sketches keep the mouse
        if !self.current_is_sketch() {
            if let Some(window) = &mut self.window {
                if window.is_cursor_captured() {
                    window.release_cursor();
                }
            }
        }
        self.update_title();
    }

    fn update_title(&self) {
        let (Some(window), Some(slide)) = (&self.window, self.deck.current()) else {
            return;
        };
        let fps = self.config.debug.show_fps.then(|| self.fps.fps());
        window.update_title(slide.header(), self.deck.current_index(), self.deck.len(), fps);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let time = self.clock.tick();
        let previous_fps = self.fps.fps();
        if self.fps.tick(time.elapsed) != previous_fps {
            self.update_title();
        }

        self.deck.update(&time);

        let Some(render) = &mut self.render else {
            return;
        };
        match render.render_frame(&mut self.deck) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => render.recover(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = WindowSystem::create(event_loop, &self.config.window)
            .unwrap_or_else(|e| fatal(e));
        let render = RenderSystem::new(
            window.window().clone(),
            self.config.window.vsync,
            &self.config.assets.font_path(),
            self.config.text.clone(),
        )
        .unwrap_or_else(|e| fatal(e));

        if let Err(e) = self.deck.init_all(render.context()) {
            self.deck.close_all();
            fatal(e);
        }

        let (width, height) = render.size();
        log::info!("Rendering at {}x{}", width, height);

        self.window = Some(window);
        self.render = Some(render);
        self.clock.reset();
        self.update_title();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                    self.deck.resize(render.context(), size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                if InputMapper::is_reserved(key) {
                    let captured = self.cursor_captured();
                    if let Some(action) =
                        InputMapper::map_keyboard(key, event.state, event.repeat, captured)
                    {
                        self.handle_action(action, event_loop);
                    }
                } else {
                    self.deck.handle_event(&SketchEvent::Key {
                        code: key,
                        state: event.state,
                        repeat: event.repeat,
                    });
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state, self.cursor_captured()) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if !self.cursor_captured() {
                    self.deck.handle_event(&SketchEvent::CursorMoved {
                        x: position.x,
                        y: position.y,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        (pos.x as f32 / PIXELS_PER_LINE, pos.y as f32 / PIXELS_PER_LINE)
                    }
                };
                self.deck.handle_event(&SketchEvent::Scroll { dx, dy });
            }

            WindowEvent::DroppedFile(path) => {
                if !self.deck.handle_event(&SketchEvent::FileDropped(path.clone())) {
                    log::warn!("Current slide ignored dropped file {}", path.display());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.cursor_captured() {
                self.deck.handle_event(&SketchEvent::MouseMotion {
                    dx: delta.0,
                    dy: delta.1,
                });
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        self.deck.close_all();
    }
}

/// Log a startup failure and exit with status 1
fn fatal(error: impl Display) -> ! {
    log::error!("{}", error);
    std::process::exit(1);
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("{}. Using defaults.", e);
    }
    log::info!("Starting {}", config.window.title);

    let event_loop = EventLoop::new().unwrap_or_else(|e| fatal(e));
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        fatal(e);
    }
}
