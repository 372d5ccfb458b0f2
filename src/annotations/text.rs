//! Text prompt: collects label text and a font size, produces a text element

use crate::config::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::domain::{Point, Shape};
use crate::render::geometry::text;
use crate::render::TextMetrics;

/// An open text prompt, anchored where the user clicked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPrompt {
    pub anchor: Point,
    /// Font size the dialog should preselect
    pub font_size: f32,
}

impl TextPrompt {
    pub fn new(anchor: Point, font_size: f32) -> Self {
        Self {
            anchor,
            font_size: clamp_font_size(font_size),
        }
    }

    /// Build the text shape for a submission
    ///
    /// Returns `None` when the text is empty or whitespace only.
    pub fn submit(&self, label: &str, font_size: f32, metrics: &dyn TextMetrics) -> Option<Shape> {
        if label.trim().is_empty() {
            return None;
        }
        let font_size = clamp_font_size(font_size);
        let (width, height) = measure_label(label, font_size, metrics);
        Some(Shape::Text {
            anchor: self.anchor,
            corner: Point::new(self.anchor.x + width, self.anchor.y + height),
            text: label.to_string(),
            font_size,
        })
    }
}

/// Clamp to the prompt's accepted range; non-finite sizes fall back to the minimum
pub fn clamp_font_size(font_size: f32) -> f32 {
    if font_size.is_finite() {
        font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    } else {
        MIN_FONT_SIZE
    }
}

/// Width of the widest line and total height of a multi-line label
pub fn measure_label(label: &str, font_size: f32, metrics: &dyn TextMetrics) -> (f32, f32) {
    let mut lines = 0usize;
    let mut width = 0.0f32;
    for line in text::lines(label) {
        lines += 1;
        width = width.max(metrics.measure_text(line, font_size));
    }
    (width, lines as f32 * text::line_pitch(font_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MonospaceMetrics;

    #[test]
    fn test_multiline_label_box() {
        let prompt = TextPrompt::new(Point::new(30.0, 40.0), 20.0);
        let metrics = MonospaceMetrics { advance: 0.5 };
        let Some(Shape::Text {
            anchor,
            corner,
            font_size,
            ..
        }) = prompt.submit("Hi\nThere", 20.0, &metrics)
        else {
            panic!("expected a text shape");
        };

        assert_eq!(anchor, Point::new(30.0, 40.0));
        assert_eq!(font_size, 20.0);
        // Widest line is "There": 5 chars * 20 * 0.5
        assert_eq!(corner.x, 80.0);
        assert!((corner.y - (40.0 + 52.0)).abs() < 1e-4);
    }

    #[test]
    fn test_blank_submission_is_discarded() {
        let prompt = TextPrompt::new(Point::default(), 20.0);
        let metrics = MonospaceMetrics::default();
        assert!(prompt.submit("", 20.0, &metrics).is_none());
        assert!(prompt.submit("  \n\t", 20.0, &metrics).is_none());
    }

    #[test]
    fn test_font_size_is_clamped() {
        assert_eq!(clamp_font_size(8.0), 14.0);
        assert_eq!(clamp_font_size(100.0), 72.0);
        assert_eq!(clamp_font_size(f32::NAN), 14.0);
        assert_eq!(TextPrompt::new(Point::default(), 90.0).font_size, 72.0);
    }
}
