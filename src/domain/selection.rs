//! Resize handles on the selected element

use super::geometry::{Bounds, Point};

/// Corner handle of a selection frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// North-West corner
    NW,
    /// North-East corner
    NE,
    /// South-West corner
    SW,
    /// South-East corner
    SE,
}

impl Handle {
    /// All handles, in the order hit-testing checks them
    pub const ALL: [Handle; 4] = [Handle::NW, Handle::NE, Handle::SW, Handle::SE];

    /// Handle center for a normalized box, pushed `outset` pixels outward
    pub fn center(self, bounds: &Bounds, outset: f32) -> Point {
        let b = bounds.expand(outset);
        match self {
            Handle::NW => b.min,
            Handle::NE => Point::new(b.max.x, b.min.y),
            Handle::SW => Point::new(b.min.x, b.max.y),
            Handle::SE => b.max,
        }
    }

    /// New anchor/corner after dragging this handle to `to`
    ///
    /// `se` moves the corner, `nw` the anchor; `ne` takes the anchor's y and
    /// the corner's x, `sw` the anchor's x and the corner's y.
    pub fn resize(self, anchor: Point, corner: Point, to: Point) -> (Point, Point) {
        match self {
            Handle::SE => (anchor, to),
            Handle::NW => (to, corner),
            Handle::NE => (Point::new(anchor.x, to.y), Point::new(to.x, corner.y)),
            Handle::SW => (Point::new(to.x, anchor.y), Point::new(corner.x, to.y)),
        }
    }
}
