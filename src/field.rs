//! The simulation state: particles, viewport size and pointer.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;

/// All mutable simulation state.
///
/// The particle count and order are fixed at construction. The viewport
/// size and pointer are updated in place as events arrive.
#[derive(Debug, Clone)]
pub struct Field {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
}

impl Field {
    /// Spawn `config.particle_count` random particles inside a
    /// `width` x `height` viewport.
    pub fn spawn<R: Rng + ?Sized>(
        config: &FieldConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let bounds = Vec2::new(width, height);
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(bounds, config, rng))
            .collect();
        Self::from_particles(particles, width, height)
    }

    /// Build a field from explicit particles.
    pub fn from_particles(particles: Vec<Particle>, width: f32, height: f32) -> Self {
        Self {
            particles,
            width,
            height,
            pointer: None,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Last observed pointer position, `None` until the first move.
    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Record a new viewport size. Particles are left where they are and
    /// drift back in through reflection.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Record the latest pointer position.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Advance every particle by one frame.
    pub fn advance(&mut self) {
        let bounds = self.bounds();
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
    }
}
