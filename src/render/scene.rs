//! Render pipeline: full clear-and-redraw of a scene
//!
//! Rendering is a pure function of the element list and the selection.
//! Jitter comes from each element's stored seed, never from a random source.

use super::geometry::{self, highlighter, redact, selection, text};
use super::surface::Surface;
use crate::config::{Color, Sloppiness};
use crate::domain::{AnnotationElement, Bounds, ElementId, Handle, Point, Shape};

/// Clear the surface and draw every element in scene order
///
/// A missing surface makes this a no-op.
pub fn render(
    elements: &[AnnotationElement],
    selected: Option<ElementId>,
    surface: Option<&mut dyn Surface>,
) {
    let Some(surface) = surface else {
        log::trace!("No drawing surface, skipping render");
        return;
    };

    surface.clear();
    for element in elements {
        draw_element(surface, element);
        if selected == Some(element.id) {
            draw_selection_frame(surface, element);
        }
    }
}

/// Draw a single element with its own style
pub fn draw_element(surface: &mut dyn Surface, element: &AnnotationElement) {
    let style = &element.style;
    surface.set_stroke_color(style.stroke_color);
    surface.set_line_width(style.stroke_width);
    surface.set_line_dash(&style.stroke_style.dash_pattern(style.stroke_width));
    surface.set_alpha(style.alpha());

    let seed = element.seed;
    let sloppiness = style.sloppiness;

    match &element.shape {
        Shape::Freehand { points } => {
            draw_smooth_stroke(surface, points, style.stroke_color, style.stroke_width);
        }
        Shape::Highlighter { points } => {
            let width = style.stroke_width * highlighter::WIDTH_FACTOR;
            surface.set_stroke_color(highlighter::COLOR);
            surface.set_line_width(width);
            surface.set_alpha(highlighter::ALPHA);
            draw_smooth_stroke(surface, points, highlighter::COLOR, width);
        }
        Shape::Line { anchor, corner } => {
            draw_sloppy_line(surface, *anchor, *corner, seed, sloppiness);
        }
        Shape::Arrow { anchor, corner } => {
            draw_sloppy_line(surface, *anchor, *corner, seed, sloppiness);
            // Head is always solid
            surface.set_line_dash(&[]);
            for head in geometry::arrow_head_points(*anchor, *corner) {
                surface.begin_path();
                surface.move_to(*corner);
                surface.line_to(head);
                surface.stroke();
            }
        }
        Shape::Rectangle { anchor, corner } => {
            let bounds = Bounds::from_corners(*anchor, *corner);
            trace_sloppy_rect(surface, &bounds, seed, sloppiness);
            fill_then_stroke(surface, element);
        }
        Shape::Ellipse { anchor, corner } => {
            let bounds = Bounds::from_corners(*anchor, *corner);
            trace_sloppy_ellipse(surface, &bounds, seed, sloppiness);
            fill_then_stroke(surface, element);
        }
        Shape::Redact { anchor, corner } => {
            draw_redaction(surface, &Bounds::from_corners(*anchor, *corner));
        }
        Shape::Text {
            anchor,
            text: label,
            font_size,
            ..
        } => {
            surface.set_fill_color(style.stroke_color);
            let pitch = text::line_pitch(*font_size);
            for (i, line) in text::lines(label).enumerate() {
                let origin = Point::new(anchor.x, anchor.y + i as f32 * pitch);
                surface.fill_text(line, origin, *font_size);
            }
        }
    }
}

/// Connect stroke points with quadratic smoothing through successive midpoints
///
/// A single recorded point is drawn as a dot of the stroke's width.
fn draw_smooth_stroke(surface: &mut dyn Surface, points: &[Point], color: Color, width: f32) {
    match points {
        [] => {}
        [dot] => {
            surface.set_fill_color(color);
            surface.begin_path();
            surface.circle(*dot, width * 0.5);
            surface.fill();
        }
        [first, rest @ ..] => {
            surface.begin_path();
            surface.move_to(*first);
            let mut prev = *first;
            for p in rest {
                surface.quad_to(prev, prev.midpoint(*p));
                prev = *p;
            }
            surface.line_to(prev);
            surface.stroke();
        }
    }
}

fn draw_sloppy_line(
    surface: &mut dyn Surface,
    from: Point,
    to: Point,
    seed: u32,
    sloppiness: Sloppiness,
) {
    for pass in geometry::sloppy_line(from, to, seed, sloppiness) {
        let Some((first, rest)) = pass.split_first() else {
            continue;
        };
        surface.begin_path();
        surface.move_to(*first);
        for p in rest {
            surface.line_to(*p);
        }
        surface.stroke();
    }
}

fn trace_sloppy_rect(
    surface: &mut dyn Surface,
    bounds: &Bounds,
    seed: u32,
    sloppiness: Sloppiness,
) {
    surface.begin_path();
    if sloppiness == Sloppiness::None {
        surface.rect(bounds.min, bounds.max);
        return;
    }
    let (start, edges) = geometry::sloppy_rect(bounds, seed, sloppiness);
    surface.move_to(start);
    for edge in edges {
        surface.quad_to(edge.ctrl, edge.to);
    }
    surface.close_path();
}

fn trace_sloppy_ellipse(
    surface: &mut dyn Surface,
    bounds: &Bounds,
    seed: u32,
    sloppiness: Sloppiness,
) {
    let (center, rx, ry) = geometry::ellipse_from_bounds(bounds);
    surface.begin_path();
    if sloppiness == Sloppiness::None {
        surface.ellipse(center, rx, ry);
        return;
    }
    let points = geometry::sloppy_ellipse(center, rx, ry, seed, sloppiness);
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.move_to(*first);
    for p in rest {
        surface.line_to(*p);
    }
    surface.close_path();
}

/// Fill the current path if the element has a fill, then stroke it
fn fill_then_stroke(surface: &mut dyn Surface, element: &AnnotationElement) {
    let fill = element.style.fill_color;
    if !fill.is_transparent() {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.stroke();
}

/// Translucent checkerboard placeholder with a dashed border
fn draw_redaction(surface: &mut dyn Surface, bounds: &Bounds) {
    surface.begin_path();
    surface.rect(bounds.min, bounds.max);
    surface.set_fill_color(redact::BASE);
    surface.fill();

    let cols = (bounds.width() / redact::CELL).ceil() as u32;
    let rows = (bounds.height() / redact::CELL).ceil() as u32;
    surface.begin_path();
    for row in 0..rows {
        for col in 0..cols {
            if (col + row) % 2 != 0 {
                continue;
            }
            let min = Point::new(
                bounds.min.x + col as f32 * redact::CELL,
                bounds.min.y + row as f32 * redact::CELL,
            );
            let max = Point::new(
                (min.x + redact::CELL).min(bounds.max.x),
                (min.y + redact::CELL).min(bounds.max.y),
            );
            surface.rect(min, max);
        }
    }
    surface.set_fill_color(redact::DARK_CELL);
    surface.fill();

    surface.begin_path();
    surface.rect(bounds.min, bounds.max);
    surface.set_stroke_color(redact::BORDER);
    surface.set_line_width(redact::BORDER_WIDTH);
    surface.set_line_dash(&redact::BORDER_DASH);
    surface.stroke();
}

/// Dashed frame around the element plus four corner resize handles
pub fn draw_selection_frame(surface: &mut dyn Surface, element: &AnnotationElement) {
    let Some(bounds) = element.bounds() else {
        return;
    };
    let frame = bounds.expand(selection::FRAME_PADDING);

    surface.set_alpha(1.0);
    surface.set_stroke_color(selection::ACCENT);
    surface.set_line_width(1.0);
    surface.set_line_dash(&selection::FRAME_DASH);
    surface.begin_path();
    surface.rect(frame.min, frame.max);
    surface.stroke();

    surface.set_line_dash(&[]);
    surface.set_fill_color(selection::HANDLE_FILL);
    for handle in Handle::ALL {
        surface.begin_path();
        surface.circle(
            handle.center(&bounds, selection::FRAME_PADDING),
            selection::HANDLE_RADIUS,
        );
        surface.fill();
        surface.stroke();
    }
}
