//! Frame timing for the render loop.
//!
//! The field has no time step (each frame advances by one velocity unit),
//! so this only feeds diagnostics: frame counts and a periodically
//! refreshed FPS figure for the logs.
//!
//! # Example
//!
//! ```ignore
//! use plexus::time::Time;
//!
//! let mut time = Time::new();
//!
//! // Once per frame:
//! time.update();
//! println!("Frame {} at {:.1} fps", time.frame(), time.fps());
//! ```

use std::time::Duration;

// std::time::Instant panics on wasm32-unknown-unknown
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Frame counter and FPS tracker.
#[derive(Debug)]
pub struct Time {
    frame_count: u64,
    /// Refreshed once per `fps_update_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// A tracker that refreshes its FPS figure every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: interval,
        }
    }

    /// Record a frame. Call once per frame.
    pub fn update(&mut self) {
        self.frame_count += 1;

        let now = Instant::now();
        let window = now.duration_since(self.fps_update_time);
        if window >= self.fps_update_interval {
            self.fps = (self.frame_count - self.fps_frame_count) as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last completed interval, 0 before the first.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
