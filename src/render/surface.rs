//! Drawing surface port
//!
//! The render pipeline talks to an immediate-mode 2D context with canvas
//! semantics: a current path built with move/line/curve calls, then stroked
//! or filled with the current state.

use crate::config::Color;
use crate::domain::Point;

/// Text measurement, needed by the text prompt as well as by rendering
pub trait TextMetrics {
    /// Rendered width of a single line of text
    fn measure_text(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed-advance metrics for surfaces without a font engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance per character as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.advance
    }
}

/// 2D immediate-mode drawing context
pub trait Surface: TextMetrics {
    /// Erase everything drawn so far
    fn clear(&mut self);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    /// Dash intervals; an empty slice means solid
    fn set_line_dash(&mut self, pattern: &[f32]);
    /// Global alpha multiplied into every stroke and fill
    fn set_alpha(&mut self, alpha: f32);

    /// Discard the current path
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, to: Point);
    fn close_path(&mut self);
    /// Add an axis-aligned rectangle subpath
    fn rect(&mut self, min: Point, max: Point);
    /// Add an ellipse subpath
    fn ellipse(&mut self, center: Point, rx: f32, ry: f32);
    /// Add a circle subpath
    fn circle(&mut self, center: Point, radius: f32) {
        self.ellipse(center, radius, radius);
    }

    /// Stroke the current path with the current stroke state
    fn stroke(&mut self);
    /// Fill the current path with the current fill color
    fn fill(&mut self);

    /// Draw one line of text in the current fill color, top-left corner at `origin`
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f32);
}
