//! # plexus
//!
//! An ambient particle backdrop: a few dozen slow points drifting across
//! the viewport, linked by hairlines that fade with distance, and reaching
//! out to the pointer when it comes near.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(40)
//!         .with_link_distance(150.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! A [`Field`] holds every [`Particle`], the viewport size, and the last
//! pointer position. Each frame every particle moves by its velocity and
//! reflects off the viewport edges by flipping the sign of the offending
//! velocity component. Positions are never clamped.
//!
//! ### Links
//!
//! Two particles closer than `link_distance` are joined by a line at
//! opacity `1 - d / link_distance`. The same rule links particles to the
//! pointer within `pointer_link_distance`, once a pointer has been seen.
//!
//! ### Hosts
//!
//! Rendering goes through the [`Canvas`] trait. Natively, [`Simulation`]
//! opens a winit window and draws through wgpu. On `wasm32`, the `web`
//! module drives an HTML canvas from `requestAnimationFrame`. Without a
//! drawing surface the [`Backdrop`] stays inert.

pub mod canvas;
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod particle;
pub mod render;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
mod gpu;
#[cfg(not(target_arch = "wasm32"))]
mod simulation;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use canvas::{Canvas, DrawCommand, Recorder};
pub use config::{FieldConfig, Rgba};
pub use error::ConfigError;
#[cfg(not(target_arch = "wasm32"))]
pub use error::{GpuError, SimulationError};
pub use field::Field;
pub use frame::{Backdrop, FrameLoop};
pub use glam::Vec2;
pub use particle::Particle;
#[cfg(not(target_arch = "wasm32"))]
pub use simulation::Simulation;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, DrawCommand, Recorder};
    pub use crate::config::{FieldConfig, Rgba};
    pub use crate::field::Field;
    pub use crate::frame::{Backdrop, FrameLoop};
    pub use crate::particle::Particle;
    pub use crate::time::Time;
    pub use crate::Vec2;
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::error::SimulationError;
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::simulation::Simulation;
}
