//! The 2D drawing surface the field renders onto.
//!
//! [`Canvas`] is the small immediate-mode API the renderer needs: clear,
//! filled circles, stroked segments, and the color/width state that
//! applies to them. Hosts implement it over whatever they draw with
//! (a wgpu vertex batch natively, `CanvasRenderingContext2d` on the web).
//!
//! [`Recorder`] captures draw calls as [`DrawCommand`]s instead of
//! drawing them. It backs the tests and is handy for headless runs.

use glam::Vec2;

use crate::config::Rgba;

/// A 2D immediate-mode drawing context.
pub trait Canvas {
    /// Resize the backing surface to `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Erase the whole surface.
    fn clear(&mut self);

    fn set_fill_color(&mut self, color: Rgba);

    fn set_stroke_color(&mut self, color: Rgba);

    fn set_line_width(&mut self, width: f32);

    /// Fill a circle with the current fill color.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Stroke a segment with the current stroke color and line width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// A recorded draw call with the state that was active when it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Clear,
    Circle { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
}

/// A [`Canvas`] that records instead of drawing.
#[derive(Debug, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fill: Rgba::new(0, 0, 0, 1.0),
            stroke: Rgba::new(0, 0, 0, 1.0),
            line_width: 1.0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded line segments as `(from, to, opacity)`.
    pub fn lines(&self) -> Vec<(Vec2, Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, color, .. } => Some((*from, *to, color.a)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded circles.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for Recorder {
    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: self.fill,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width: self.line_width,
            color: self.stroke,
        });
    }
}
