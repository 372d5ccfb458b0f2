//! Surface that records what was drawn instead of rasterizing it
//!
//! Useful for hosts that replay drawing into their own toolkit, and for
//! checking render output structurally.

use super::surface::{MonospaceMetrics, Surface, TextMetrics};
use crate::config::Color;
use crate::domain::Point;

/// One path construction step
#[derive(Clone, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    Close,
    Rect(Point, Point),
    Ellipse(Point, f32, f32),
}

/// A finished drawing operation, with the state it was drawn under
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Clear,
    Stroke {
        path: Vec<PathOp>,
        color: Color,
        width: f32,
        dash: Vec<f32>,
        alpha: f32,
    },
    Fill {
        path: Vec<PathOp>,
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f32,
        color: Color,
        alpha: f32,
    },
}

#[derive(Clone, Debug)]
pub struct RecordingSurface {
    metrics: MonospaceMetrics,
    stroke_color: Color,
    fill_color: Color,
    width: f32,
    dash: Vec<f32>,
    alpha: f32,
    path: Vec<PathOp>,
    operations: Vec<Operation>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_metrics(MonospaceMetrics::default())
    }

    pub fn with_metrics(metrics: MonospaceMetrics) -> Self {
        Self {
            metrics,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            width: 1.0,
            dash: Vec::new(),
            alpha: 1.0,
            path: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Operations recorded since the last `clear`
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Stroke operations only
    pub fn strokes(&self) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Stroke { .. }))
    }

    /// Fill operations only
    pub fn fills(&self) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Fill { .. }))
    }
}

impl TextMetrics for RecordingSurface {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.measure_text(text, font_size)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.operations.clear();
        self.path.clear();
        self.operations.push(Operation::Clear);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.width = width;
    }

    fn set_line_dash(&mut self, pattern: &[f32]) {
        self.dash = pattern.to_vec();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.push(PathOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathOp::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.path.push(PathOp::QuadTo(ctrl, to));
    }

    fn close_path(&mut self) {
        self.path.push(PathOp::Close);
    }

    fn rect(&mut self, min: Point, max: Point) {
        self.path.push(PathOp::Rect(min, max));
    }

    fn ellipse(&mut self, center: Point, rx: f32, ry: f32) {
        self.path.push(PathOp::Ellipse(center, rx, ry));
    }

    fn stroke(&mut self) {
        self.operations.push(Operation::Stroke {
            path: self.path.clone(),
            color: self.stroke_color,
            width: self.width,
            dash: self.dash.clone(),
            alpha: self.alpha,
        });
    }

    fn fill(&mut self) {
        self.operations.push(Operation::Fill {
            path: self.path.clone(),
            color: self.fill_color,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f32) {
        self.operations.push(Operation::Text {
            text: text.to_string(),
            origin,
            font_size,
            color: self.fill_color,
            alpha: self.alpha,
        });
    }
}
