//! CPU tessellation of circles and segments into a triangle list.

use glam::Vec2;

use super::shader::Vertex;

/// Triangles per circle.
const CIRCLE_SEGMENTS: usize = 16;

/// Strokes thinner than this are widened and faded instead, so hairlines
/// still cover whole pixels.
const MIN_STROKE_WIDTH: f32 = 1.0;

/// A frame's worth of triangles.
#[derive(Debug, Default)]
pub struct Batch {
    vertices: Vec<Vertex>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a filled circle as a triangle fan.
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 {
            return;
        }
        let step = std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
        for i in 0..CIRCLE_SEGMENTS {
            let a0 = i as f32 * step;
            let a1 = (i + 1) as f32 * step;
            let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radius;
            let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
            self.push_triangle([center, p0, p1], color);
        }
    }

    /// Append a segment as a quad of the given width.
    pub fn push_line(&mut self, from: Vec2, to: Vec2, width: f32, mut color: [f32; 4]) {
        let Some(dir) = (to - from).try_normalize() else {
            return;
        };
        let stroke = if width < MIN_STROKE_WIDTH {
            color[3] *= width / MIN_STROKE_WIDTH;
            MIN_STROKE_WIDTH
        } else {
            width
        };
        let offset = dir.perp() * (stroke * 0.5);

        let a = from + offset;
        let b = from - offset;
        let c = to + offset;
        let d = to - offset;
        self.push_triangle([a, b, c], color);
        self.push_triangle([c, b, d], color);
    }

    fn push_triangle(&mut self, points: [Vec2; 3], color: [f32; 4]) {
        self.vertices.extend(points.iter().map(|p| Vertex {
            position: p.to_array(),
            color,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_circle_vertex_count() {
        let mut batch = Batch::new();
        batch.push_circle(Vec2::new(5.0, 5.0), 2.0, WHITE);
        assert_eq!(batch.vertices().len(), CIRCLE_SEGMENTS * 3);

        for v in batch.vertices() {
            let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
            assert!(d <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_shapes_skipped() {
        let mut batch = Batch::new();
        batch.push_circle(Vec2::ZERO, 0.0, WHITE);
        batch.push_line(Vec2::ONE, Vec2::ONE, 1.0, WHITE);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_line_quad_width() {
        let mut batch = Batch::new();
        batch.push_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 4.0, WHITE);

        let vertices = batch.vertices();
        assert_eq!(vertices.len(), 6);
        let max_y = vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((max_y - min_y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_hairline_widened_and_faded() {
        let mut batch = Batch::new();
        batch.push_line(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), 0.5, [1.0, 1.0, 1.0, 0.8]);

        let v = batch.vertices()[0];
        assert!((v.color[3] - 0.4).abs() < 1e-6);
        let xs: Vec<f32> = batch.vertices().iter().map(|v| v.position[0]).collect();
        let spread = xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min);
        assert!((spread - MIN_STROKE_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn test_clear() {
        let mut batch = Batch::new();
        batch.push_circle(Vec2::ZERO, 1.0, WHITE);
        batch.clear();
        assert!(batch.is_empty());
    }
}
