//! Annotation elements: one scene entry each
//!
//! All element types store coordinates in surface-local space.

use std::fmt;

use super::geometry::{Bounds, Point};
use crate::config::Style;

/// Opaque element identifier, assigned at creation and never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element kind without its geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Freehand,
    Highlighter,
    Line,
    Arrow,
    Rectangle,
    Ellipse,
    Redact,
    Text,
}

/// Per-kind geometry
///
/// Every kind except freehand/highlighter is defined by an `anchor` (where
/// the gesture started) and a `corner` (where it ended); the two need not be
/// ordered. Strokes keep the append-only list of recorded positions instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Freehand { points: Vec<Point> },
    Highlighter { points: Vec<Point> },
    Line { anchor: Point, corner: Point },
    Arrow { anchor: Point, corner: Point },
    Rectangle { anchor: Point, corner: Point },
    Ellipse { anchor: Point, corner: Point },
    Redact { anchor: Point, corner: Point },
    Text {
        anchor: Point,
        corner: Point,
        text: String,
        font_size: f32,
    },
}

impl Shape {
    /// Two-point shape of the given kind; `None` for stroke and text kinds
    pub fn from_drag(kind: ElementKind, anchor: Point, corner: Point) -> Option<Shape> {
        match kind {
            ElementKind::Line => Some(Shape::Line { anchor, corner }),
            ElementKind::Arrow => Some(Shape::Arrow { anchor, corner }),
            ElementKind::Rectangle => Some(Shape::Rectangle { anchor, corner }),
            ElementKind::Ellipse => Some(Shape::Ellipse { anchor, corner }),
            ElementKind::Redact => Some(Shape::Redact { anchor, corner }),
            ElementKind::Freehand | ElementKind::Highlighter | ElementKind::Text => None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Shape::Freehand { .. } => ElementKind::Freehand,
            Shape::Highlighter { .. } => ElementKind::Highlighter,
            Shape::Line { .. } => ElementKind::Line,
            Shape::Arrow { .. } => ElementKind::Arrow,
            Shape::Rectangle { .. } => ElementKind::Rectangle,
            Shape::Ellipse { .. } => ElementKind::Ellipse,
            Shape::Redact { .. } => ElementKind::Redact,
            Shape::Text { .. } => ElementKind::Text,
        }
    }

    /// Anchor/corner pair for two-point kinds
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self {
            Shape::Freehand { .. } | Shape::Highlighter { .. } => None,
            Shape::Line { anchor, corner }
            | Shape::Arrow { anchor, corner }
            | Shape::Rectangle { anchor, corner }
            | Shape::Ellipse { anchor, corner }
            | Shape::Redact { anchor, corner }
            | Shape::Text { anchor, corner, .. } => Some((*anchor, *corner)),
        }
    }

    /// Anchor and corner as resize handles see them; strokes report their box min/max
    pub fn resize_frame(&self) -> Option<(Point, Point)> {
        self.endpoints().or_else(|| self.bounds().map(|b| (b.min, b.max)))
    }

    /// Recorded stroke positions for freehand/highlighter kinds
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Shape::Freehand { points } | Shape::Highlighter { points } => Some(points),
            _ => None,
        }
    }

    /// Normalized box; strokes use the extents of their recorded points
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Shape::Freehand { points } | Shape::Highlighter { points } => {
                Bounds::from_points(points)
            }
            Shape::Line { anchor, corner }
            | Shape::Arrow { anchor, corner }
            | Shape::Rectangle { anchor, corner }
            | Shape::Ellipse { anchor, corner }
            | Shape::Redact { anchor, corner }
            | Shape::Text { anchor, corner, .. } => Some(Bounds::from_corners(*anchor, *corner)),
        }
    }

    /// Replace anchor/corner in place
    ///
    /// Strokes treat `anchor`/`corner` as the min/max of their current box and
    /// have every point remapped from the old box onto the new one.
    pub fn set_endpoints(&mut self, new_anchor: Point, new_corner: Point) {
        match self {
            Shape::Freehand { points } | Shape::Highlighter { points } => {
                let Some(old) = Bounds::from_points(points) else {
                    return;
                };
                for p in points.iter_mut() {
                    *p = remap(*p, &old, new_anchor, new_corner);
                }
            }
            Shape::Line { anchor, corner }
            | Shape::Arrow { anchor, corner }
            | Shape::Rectangle { anchor, corner }
            | Shape::Ellipse { anchor, corner }
            | Shape::Redact { anchor, corner }
            | Shape::Text { anchor, corner, .. } => {
                *anchor = new_anchor;
                *corner = new_corner;
            }
        }
    }

    /// Translate the whole shape, preserving its size
    pub fn translate(&mut self, delta: Point) {
        match self {
            Shape::Freehand { points } | Shape::Highlighter { points } => {
                for p in points.iter_mut() {
                    *p = *p + delta;
                }
            }
            Shape::Line { anchor, corner }
            | Shape::Arrow { anchor, corner }
            | Shape::Rectangle { anchor, corner }
            | Shape::Ellipse { anchor, corner }
            | Shape::Redact { anchor, corner }
            | Shape::Text { anchor, corner, .. } => {
                *anchor = *anchor + delta;
                *corner = *corner + delta;
            }
        }
    }
}

/// Map `p` from box `old` onto the box spanned by `min`..`max`
///
/// A zero-extent axis keeps the point's offset from the box origin.
fn remap(p: Point, old: &Bounds, min: Point, max: Point) -> Point {
    let axis = |v: f32, old_min: f32, old_len: f32, new_min: f32, new_max: f32| {
        if old_len.abs() < f32::EPSILON {
            new_min + (v - old_min)
        } else {
            new_min + (v - old_min) / old_len * (new_max - new_min)
        }
    };
    Point::new(
        axis(p.x, old.min.x, old.width(), min.x, max.x),
        axis(p.y, old.min.y, old.height(), min.y, max.y),
    )
}

/// One persisted markup object in the scene
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationElement {
    pub id: ElementId,
    pub shape: Shape,
    /// Style copied from the editor when the element was created
    pub style: Style,
    /// Jitter seed, fixed for the element's whole life
    pub seed: u32,
}

impl AnnotationElement {
    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    /// Anchor point: the drag start, or the top-left of a stroke's box
    pub fn anchor(&self) -> Option<Point> {
        match self.shape.endpoints() {
            Some((anchor, _)) => Some(anchor),
            None => self.shape.bounds().map(|b| b.min),
        }
    }

    /// Anchor and corner; strokes report their box min/max
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.shape.resize_frame()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.shape.bounds()
    }
}
