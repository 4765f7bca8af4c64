//! Drawing the field: particle dots, pair links and pointer links.
//!
//! Links fade linearly with distance. A pair at distance `d` under the
//! threshold `D` is stroked at opacity `1 - d / D`; at or beyond `D`
//! nothing is drawn.
//!
//! The pair pass checks every unordered pair once, so it costs
//! `n * (n - 1) / 2` distance tests per frame (780 at the default 40
//! particles). It is the dominant per-frame cost.

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::field::Field;

/// Opacity of a link spanning `distance`, or `None` if it is too long.
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

/// Fill every particle as a circle of its own radius.
pub fn draw_particles<C: Canvas + ?Sized>(canvas: &mut C, field: &Field, config: &FieldConfig) {
    canvas.set_fill_color(config.particle_color);
    for p in field.particles() {
        canvas.fill_circle(p.position, p.radius);
    }
}

/// Link each unordered pair of particles closer than `link_distance`.
///
/// Returns the number of links drawn.
pub fn draw_links<C: Canvas + ?Sized>(canvas: &mut C, field: &Field, config: &FieldConfig) -> usize {
    let particles = field.particles();
    let threshold = config.link_distance;
    let mut drawn = 0;

    canvas.set_line_width(config.line_width);
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = a.position.distance(b.position);
            if let Some(opacity) = link_opacity(distance, threshold) {
                canvas.set_stroke_color(config.link_color.with_alpha(opacity));
                canvas.stroke_line(a.position, b.position);
                drawn += 1;
            }
        }
    }
    drawn
}

/// Link each particle closer than `pointer_link_distance` to the pointer.
///
/// Draws nothing until the field has seen a pointer move. Returns the
/// number of links drawn.
pub fn draw_pointer_links<C: Canvas + ?Sized>(
    canvas: &mut C,
    field: &Field,
    config: &FieldConfig,
) -> usize {
    let Some(pointer) = field.pointer() else {
        return 0;
    };
    let threshold = config.pointer_link_distance;
    let mut drawn = 0;

    canvas.set_line_width(config.line_width);
    for p in field.particles() {
        let distance = p.position.distance(pointer);
        if let Some(opacity) = link_opacity(distance, threshold) {
            canvas.set_stroke_color(config.link_color.with_alpha(opacity));
            canvas.stroke_line(p.position, pointer);
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;
    use crate::particle::Particle;
    use glam::Vec2;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0)
    }

    #[test]
    fn test_link_opacity_law() {
        assert_eq!(link_opacity(0.0, 150.0), Some(1.0));
        assert!((link_opacity(75.0, 150.0).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(link_opacity(150.0, 150.0), None);
        assert_eq!(link_opacity(151.0, 150.0), None);
    }

    #[test]
    fn test_two_particles_one_link() {
        let field = Field::from_particles(vec![still(0.0, 0.0), still(100.0, 0.0)], 800.0, 600.0);
        let config = FieldConfig::default();
        let mut canvas = Recorder::new();

        assert_eq!(draw_links(&mut canvas, &field, &config), 1);

        let lines = canvas.lines();
        assert_eq!(lines.len(), 1);
        let (from, to, opacity) = lines[0];
        assert_eq!(from, Vec2::new(0.0, 0.0));
        assert_eq!(to, Vec2::new(100.0, 0.0));
        assert!((opacity - (1.0 - 100.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn test_each_pair_once() {
        // Three mutually close particles: exactly three links
        let field = Field::from_particles(
            vec![still(0.0, 0.0), still(10.0, 0.0), still(0.0, 10.0)],
            100.0,
            100.0,
        );
        let mut canvas = Recorder::new();
        assert_eq!(draw_links(&mut canvas, &field, &FieldConfig::default()), 3);
    }

    #[test]
    fn test_no_link_at_threshold() {
        let field = Field::from_particles(vec![still(0.0, 0.0), still(150.0, 0.0)], 800.0, 600.0);
        let mut canvas = Recorder::new();
        assert_eq!(draw_links(&mut canvas, &field, &FieldConfig::default()), 0);
        assert!(canvas.lines().is_empty());
    }

    #[test]
    fn test_pointer_links_need_pointer() {
        let mut field = Field::from_particles(vec![still(0.0, 0.0), still(500.0, 0.0)], 800.0, 600.0);
        let config = FieldConfig::default();
        let mut canvas = Recorder::new();

        assert_eq!(draw_pointer_links(&mut canvas, &field, &config), 0);

        field.pointer_moved(Vec2::new(0.0, 50.0));
        assert_eq!(draw_pointer_links(&mut canvas, &field, &config), 1);

        let (from, to, opacity) = canvas.lines()[0];
        assert_eq!(from, Vec2::ZERO);
        assert_eq!(to, Vec2::new(0.0, 50.0));
        assert!((opacity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_link_style() {
        let field = Field::from_particles(vec![still(0.0, 0.0), still(30.0, 0.0)], 100.0, 100.0);
        let config = FieldConfig::default();
        let mut canvas = Recorder::new();
        draw_links(&mut canvas, &field, &config);

        match &canvas.commands()[0] {
            crate::canvas::DrawCommand::Line { width, color, .. } => {
                assert_eq!(*width, 0.5);
                assert_eq!((color.r, color.g, color.b), (100, 255, 218));
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }
}
