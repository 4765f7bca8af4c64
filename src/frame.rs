//! The per-frame driver.
//!
//! A [`FrameLoop`] owns the [`Field`] and the [`Canvas`] it draws on. The
//! host calls [`FrameLoop::frame`] once per display refresh and re-arms
//! its frame callback while it returns `true`. Resize and pointer events
//! are applied between frames by the same single-threaded host, so the
//! loop never needs to synchronise.
//!
//! [`Backdrop`] makes the "no drawing surface" case explicit: a page or
//! window without a usable surface gets [`Backdrop::Inert`], which
//! ignores every event and never asks for a frame.

use glam::Vec2;
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::field::Field;
use crate::render::{draw_links, draw_particles, draw_pointer_links};
use crate::time::Time;

/// How many frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 300;

/// Owns the field and its canvas and renders one frame at a time.
pub struct FrameLoop<C: Canvas> {
    field: Field,
    canvas: C,
    config: FieldConfig,
    time: Time,
    active: bool,
}

impl<C: Canvas> FrameLoop<C> {
    /// Size `canvas` to the field's viewport and start in the active state.
    pub fn new(field: Field, mut canvas: C, config: FieldConfig) -> Self {
        canvas.resize(field.width() as u32, field.height() as u32);
        Self {
            field,
            canvas,
            config,
            time: Time::new(),
            active: true,
        }
    }

    /// Render one frame.
    ///
    /// Clears the canvas, advances and draws every particle, then runs the
    /// pair and pointer link passes. Returns whether the host should
    /// request another frame. A stopped loop draws nothing.
    pub fn frame(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.canvas.clear();
        self.field.advance();
        draw_particles(&mut self.canvas, &self.field, &self.config);
        let links = draw_links(&mut self.canvas, &self.field, &self.config);
        let pointer_links = draw_pointer_links(&mut self.canvas, &self.field, &self.config);

        self.time.update();
        if self.time.frame() % FPS_LOG_INTERVAL == 0 {
            tracing::debug!(
                frame = self.time.frame(),
                fps = self.time.fps(),
                links,
                pointer_links,
                "frame stats"
            );
        }

        self.active
    }

    /// Apply a viewport resize to both the canvas and the field.
    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "viewport resized");
        self.canvas.resize(width, height);
        self.field.resize(width as f32, height as f32);
    }

    /// Record the latest pointer position.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.field.pointer_moved(position);
    }

    /// Stop re-arming. The next [`frame`](Self::frame) returns `false`.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}

/// The backdrop component: either running a [`FrameLoop`] or inert.
pub enum Backdrop<C: Canvas> {
    /// No drawing surface was available. Every event is ignored.
    Inert,
    Running(FrameLoop<C>),
}

impl<C: Canvas> Backdrop<C> {
    /// Start a backdrop on `canvas`, or an inert one if there is none.
    pub fn attach<R: Rng + ?Sized>(
        canvas: Option<C>,
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        match canvas {
            Some(canvas) => {
                let field = Field::spawn(&config, width as f32, height as f32, rng);
                tracing::info!(
                    particles = field.particles().len(),
                    width,
                    height,
                    "particle backdrop running"
                );
                Backdrop::Running(FrameLoop::new(field, canvas, config))
            }
            None => {
                tracing::debug!("no drawing surface, particle backdrop inert");
                Backdrop::Inert
            }
        }
    }

    /// Render one frame. Returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        match self {
            Backdrop::Running(frame_loop) => frame_loop.frame(),
            Backdrop::Inert => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Backdrop::Running(frame_loop) = self {
            frame_loop.resize(width, height);
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Backdrop::Running(frame_loop) = self {
            frame_loop.pointer_moved(position);
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Backdrop::Running(_))
    }

    pub fn frame_loop(&self) -> Option<&FrameLoop<C>> {
        match self {
            Backdrop::Running(frame_loop) => Some(frame_loop),
            Backdrop::Inert => None,
        }
    }

    pub fn frame_loop_mut(&mut self) -> Option<&mut FrameLoop<C>> {
        match self {
            Backdrop::Running(frame_loop) => Some(frame_loop),
            Backdrop::Inert => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, Recorder};
    use crate::particle::Particle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_sizes_canvas() {
        let field = Field::from_particles(Vec::new(), 640.0, 480.0);
        let frame_loop = FrameLoop::new(field, Recorder::new(), FieldConfig::default());
        assert_eq!(
            frame_loop.canvas().commands(),
            &[DrawCommand::Resize { width: 640, height: 480 }]
        );
    }

    #[test]
    fn test_frame_order() {
        let particles = vec![
            Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0),
            Particle::new(Vec2::new(20.0, 10.0), Vec2::ZERO, 2.0),
        ];
        let field = Field::from_particles(particles, 100.0, 100.0);
        let mut frame_loop = FrameLoop::new(field, Recorder::new(), FieldConfig::default());
        frame_loop.canvas_mut().take();

        assert!(frame_loop.frame());

        let commands = frame_loop.canvas().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Circle { radius, .. } if radius == 1.0));
        assert!(matches!(commands[2], DrawCommand::Circle { radius, .. } if radius == 2.0));
        assert!(matches!(commands[3], DrawCommand::Line { .. }));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn test_stop_prevents_rearm() {
        let field = Field::from_particles(Vec::new(), 10.0, 10.0);
        let mut frame_loop = FrameLoop::new(field, Recorder::new(), FieldConfig::default());
        frame_loop.canvas_mut().take();

        frame_loop.stop();
        assert!(!frame_loop.is_active());
        assert!(!frame_loop.frame());
        assert!(frame_loop.canvas().commands().is_empty());
    }

    #[test]
    fn test_inert_backdrop_ignores_events() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut backdrop: Backdrop<Recorder> =
            Backdrop::attach(None, 800, 600, FieldConfig::default(), &mut rng);

        assert!(!backdrop.is_running());
        backdrop.resize(100, 100);
        backdrop.pointer_moved(Vec2::ONE);
        assert!(!backdrop.frame());
        assert!(backdrop.frame_loop().is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_inert_attach_is_silent() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing::Level;
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::Layer;

        struct CountAlerts(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for CountAlerts {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let level = *event.metadata().level();
                if level == Level::WARN || level == Level::ERROR {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let alerts = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountAlerts(alerts.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let mut rng = StdRng::seed_from_u64(5);
            let mut backdrop: Backdrop<Recorder> =
                Backdrop::attach(None, 800, 600, FieldConfig::default(), &mut rng);
            backdrop.resize(10, 10);
            backdrop.frame();
        });

        assert_eq!(alerts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_running_backdrop_applies_events() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut backdrop =
            Backdrop::attach(Some(Recorder::new()), 800, 600, FieldConfig::default(), &mut rng);

        assert!(backdrop.is_running());
        backdrop.resize(1024, 768);
        backdrop.pointer_moved(Vec2::new(5.0, 6.0));
        assert!(backdrop.frame());

        let field = backdrop.frame_loop().unwrap().field();
        assert_eq!(field.particles().len(), 40);
        assert_eq!((field.width(), field.height()), (1024.0, 768.0));
        assert_eq!(field.pointer(), Some(Vec2::new(5.0, 6.0)));
    }
}
