//! Native window host.
//!
//! Opens a winit window, draws the backdrop into it through
//! [`GpuCanvas`], and feeds it resize and cursor events. Each redraw
//! renders one frame and requests the next while the frame loop is active.

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::SimulationError;
use crate::frame::Backdrop;
use crate::gpu::GpuCanvas;

/// A backdrop window builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Simulation::new()
///     .with_particle_count(80)
///     .with_link_distance(120.0)
///     .run()?;
/// ```
pub struct Simulation {
    config: FieldConfig,
    title: String,
    seed: Option<u64>,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            title: "plexus".to_string(),
            seed: None,
        }
    }

    /// Replace the whole field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Set the particle-to-particle link distance.
    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.config.link_distance = distance;
        self
    }

    /// Set the particle-to-pointer link distance.
    pub fn with_pointer_link_distance(mut self, distance: f32) -> Self {
        self.config.pointer_link_distance = distance;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Seed the particle layout for a reproducible start.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Run until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        // Frames are paced by redraw requests, which follow vsync
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Simulation,
    window: Option<Arc<Window>>,
    /// `None` until the window exists.
    backdrop: Option<Backdrop<GpuCanvas>>,
    failure: Option<SimulationError>,
}

impl App {
    fn new(settings: Simulation) -> Self {
        Self {
            settings,
            window: None,
            backdrop: None,
            failure: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(backdrop) = &mut self.backdrop else {
            return;
        };

        let rearm = backdrop.frame();
        if let Some(frame_loop) = backdrop.frame_loop_mut() {
            let canvas = frame_loop.canvas_mut();
            match canvas.present() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => canvas.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("GPU out of memory, closing");
                    event_loop.exit();
                    return;
                }
                Err(e) => tracing::warn!(error = ?e, "render error"),
            }
        }

        if rearm {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.failure = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        let config = self.settings.config.clone();
        let canvas = match pollster::block_on(GpuCanvas::new(window.clone(), config.background)) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                tracing::debug!(error = %e, "could not acquire a drawing context");
                None
            }
        };

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let backdrop = Backdrop::attach(canvas, size.width, size.height, config, &mut rng);
        if backdrop.is_running() {
            window.request_redraw();
        }
        self.backdrop = Some(backdrop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
