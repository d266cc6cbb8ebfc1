//! Portfolio Backdrop
//!
//! Hosts the animated point-cloud backdrop in a window: redraw requests
//! drive the frame loop, window resizes and theme toggles are forwarded to
//! the backdrop.
//!
//! Keys: `T` toggles the theme, `Esc` quits.

mod cli;
mod preference;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use cli::Args;
use particle_field::Theme;
use particle_renderer::{
    Backdrop, BackdropSettings, GpuScene, LoopHandle, RenderError, Viewport,
};
use preference::ThemePreference;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

fn system_theme(theme: winit::window::Theme) -> Theme {
    match theme {
        winit::window::Theme::Light => Theme::Light,
        winit::window::Theme::Dark => Theme::Dark,
    }
}

struct App {
    args: Args,
    preference: ThemePreference,
    window: Option<Arc<Window>>,
    backdrop: Backdrop<GpuScene>,
    frame_loop: Option<LoopHandle>,
    /// Frame timestamps are measured from here
    clock: Instant,
    theme: Theme,
    /// Track the OS color scheme until the user picks a theme
    follow_system: bool,
}

impl App {
    fn new(args: Args) -> Self {
        let preference = match &args.theme_file {
            Some(path) => ThemePreference::at(path),
            None => ThemePreference::default_location(),
        };
        match preference.path() {
            Some(path) => log::debug!("Theme preference file: {}", path.display()),
            None => log::warn!("No config directory; theme choice will not be remembered"),
        }
        let settings = BackdropSettings {
            seed: args.seed,
            ..Default::default()
        };

        Self {
            args,
            preference,
            window: None,
            backdrop: Backdrop::new(settings),
            frame_loop: None,
            clock: Instant::now(),
            theme: Theme::default(),
            follow_system: true,
        }
    }

    /// CLI flag, then saved preference, then the OS color scheme, then dark
    fn resolve_initial_theme(&mut self, window: &Window) -> Theme {
        if let Some(theme) = self.args.theme {
            self.follow_system = false;
            return theme;
        }

        match self.preference.load() {
            Ok(Some(theme)) => {
                self.follow_system = false;
                return theme;
            }
            Ok(None) => {}
            Err(err) => log::warn!("Ignoring theme preference: {}", err),
        }

        window.theme().map(system_theme).unwrap_or_default()
    }

    fn viewport(window: &Window) -> Viewport {
        let size = window.inner_size();
        Viewport::from_physical(size.width, size.height, window.scale_factor())
    }

    fn set_theme(&mut self, theme: Theme, remember: bool) {
        self.theme = theme;
        self.backdrop.on_theme_change(theme);

        if remember {
            self.follow_system = false;
            if let Err(err) = self.preference.save(theme) {
                log::warn!("Could not save theme preference: {}", err);
            }
        }
        log::info!("Theme switched to: {}", theme);
    }

    fn is_running(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(LoopHandle::is_running)
    }

    fn request_frame(&self) {
        if let (Some(window), true) = (&self.window, self.is_running()) {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Portfolio Backdrop")
            .with_inner_size(winit::dpi::LogicalSize::new(self.args.width, self.args.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let theme = self.resolve_initial_theme(&window);
        self.theme = theme;
        let viewport = Self::viewport(&window);
        let max_pixel_ratio = self.backdrop.settings().max_pixel_ratio;

        // Without a surface the window stays up, just without a backdrop
        let scene = match pollster::block_on(GpuScene::new(window.clone(), viewport, max_pixel_ratio))
        {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("Particle backdrop unavailable: {}", err);
                return;
            }
        };

        match self.backdrop.initialize(scene, viewport, theme) {
            Ok(handle) => {
                self.clock = Instant::now();
                self.frame_loop = Some(handle);
                self.request_frame();
            }
            Err(err) => log::error!("Particle backdrop unavailable: {}", err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(handle) = &self.frame_loop {
                    handle.stop();
                }
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyT),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.set_theme(self.theme.toggled(), true);
            }

            WindowEvent::ThemeChanged(system) => {
                if self.follow_system {
                    self.set_theme(system_theme(system), false);
                }
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let viewport = Self::viewport(window);
                    self.backdrop.on_resize(viewport);
                }
            }

            WindowEvent::Occluded(occluded) => {
                if let Some(handle) = &self.frame_loop {
                    if occluded {
                        handle.stop();
                    } else {
                        handle.resume();
                        self.request_frame();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now_millis = self.clock.elapsed().as_secs_f64() * 1000.0;
                match self.backdrop.on_frame(now_millis) {
                    Ok(()) => {}
                    Err(err) if err.needs_reconfigure() => {
                        log::warn!("{}; reconfiguring surface", err);
                        let viewport = self.backdrop.viewport();
                        self.backdrop.on_resize(viewport);
                    }
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        event_loop.exit();
                        return;
                    }
                    Err(err) => log::warn!("{}", err),
                }
                self.request_frame();
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting portfolio backdrop...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {}", err);
            std::process::exit(1);
        }
    };
    // Frames are paced by redraw requests, not by polling
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(args);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated: {}", err);
    }
}
