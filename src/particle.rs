//! A single drifting point.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;

/// One point in the field.
///
/// Velocity is only ever changed by reflection, which flips the sign of a
/// component, so speed is constant for the particle's whole life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Render radius, fixed at creation.
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// A particle placed uniformly inside `bounds` with a velocity whose
    /// components are uniform in `[-max_speed, max_speed)`.
    pub fn random<R: Rng + ?Sized>(bounds: Vec2, config: &FieldConfig, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.gen::<f32>() * bounds.x,
            rng.gen::<f32>() * bounds.y,
        );
        let velocity = Vec2::new(
            (rng.gen::<f32>() * 2.0 - 1.0) * config.max_speed,
            (rng.gen::<f32>() * 2.0 - 1.0) * config.max_speed,
        );
        let [min_radius, max_radius] = config.radius_range;
        let radius = min_radius + rng.gen::<f32>() * (max_radius - min_radius);
        Self::new(position, velocity, radius)
    }

    /// Advance by one frame, then reflect off the `[0, bounds]` rectangle.
    ///
    /// The position is never clamped, so a particle may sit outside the
    /// rectangle for a frame. A component is negated only while it still
    /// points outward, so one crossing yields exactly one flip.
    pub fn advance(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > bounds.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > bounds.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_left_edge_reflection() {
        let mut p = Particle::new(Vec2::new(-1.0, 50.0), Vec2::new(-0.3, 0.1), 1.0);
        p.advance(Vec2::new(800.0, 600.0));

        assert!(approx(p.velocity, Vec2::new(0.3, 0.1)));
        assert!(approx(p.position, Vec2::new(-1.3, 50.1)));
    }

    #[test]
    fn test_single_flip_per_crossing() {
        let bounds = Vec2::new(100.0, 100.0);
        // Left outside the bounds, e.g. by a shrinking resize
        let mut p = Particle::new(Vec2::new(-1.0, 50.0), Vec2::new(-0.25, 0.0), 1.0);

        p.advance(bounds);
        assert_eq!(p.position.x, -1.25);
        assert_eq!(p.velocity.x, 0.25);

        // Still out of bounds but heading back in: no further flips
        for _ in 0..4 {
            p.advance(bounds);
            assert!(p.position.x < 0.0);
            assert_eq!(p.velocity.x, 0.25);
        }
    }

    #[test]
    fn test_single_flip_at_top_edge() {
        let bounds = Vec2::new(100.0, 100.0);
        let mut p = Particle::new(Vec2::new(50.0, -1.0), Vec2::new(0.1, -0.25), 1.0);

        p.advance(bounds);
        assert_eq!(p.position.y, -1.25);
        assert_eq!(p.velocity, Vec2::new(0.1, 0.25));

        for _ in 0..4 {
            p.advance(bounds);
            assert!(p.position.y < 0.0);
            assert_eq!(p.velocity, Vec2::new(0.1, 0.25));
        }
    }

    #[test]
    fn test_far_edges_reflect_each_axis() {
        let bounds = Vec2::new(100.0, 80.0);
        let mut p = Particle::new(Vec2::new(99.9, 79.9), Vec2::new(0.2, 0.2), 1.0);
        p.advance(bounds);
        assert!(approx(p.velocity, Vec2::new(-0.2, -0.2)));

        let mut q = Particle::new(Vec2::new(99.9, 40.0), Vec2::new(0.2, 0.2), 1.0);
        q.advance(bounds);
        assert!(approx(q.velocity, Vec2::new(-0.2, 0.2)));
    }

    #[test]
    fn test_speed_is_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();
        let bounds = Vec2::new(50.0, 30.0);

        for _ in 0..20 {
            let mut p = Particle::random(bounds, &config, &mut rng);
            let speed = p.velocity.length();
            for _ in 0..2_000 {
                p.advance(bounds);
                assert!((p.velocity.length() - speed).abs() < 1e-6);
                // Never more than one frame's displacement outside
                assert!(p.position.x >= -config.max_speed && p.position.x <= bounds.x + config.max_speed);
                assert!(p.position.y >= -config.max_speed && p.position.y <= bounds.y + config.max_speed);
            }
        }
    }

    #[test]
    fn test_random_respects_config() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = FieldConfig::default();
        let bounds = Vec2::new(800.0, 600.0);

        for _ in 0..500 {
            let p = Particle::random(bounds, &config, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x < bounds.x);
            assert!(p.position.y >= 0.0 && p.position.y < bounds.y);
            assert!(p.velocity.x.abs() <= config.max_speed);
            assert!(p.velocity.y.abs() <= config.max_speed);
            assert!(p.radius >= config.radius_range[0] && p.radius < config.radius_range[1]);
        }
    }
}
