//! Shared geometry calculations for annotations
//!
//! This module contains the constants and the deterministic jitter kernel
//! used by the render pipeline and by hit-testing. Every function here is
//! pure: the same seed and index always produce the same geometry.

use std::f32::consts::TAU;

use crate::config::Sloppiness;
use crate::domain::{Bounds, Point};

/// Arrow geometry constants
pub mod arrow {
    /// Length of each arrowhead segment in pixels
    pub const HEAD_LENGTH: f32 = 15.0;
    /// Arrowhead angle from shaft in radians (30 degrees)
    pub const HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
}

/// Jitter kernel constants
pub mod jitter {
    /// Peak-to-peak wobble for sloppiness 1
    pub const AMPLITUDE_LOW: f32 = 2.0;
    /// Peak-to-peak wobble for sloppiness 2
    pub const AMPLITUDE_HIGH: f32 = 5.0;
    /// Subdivisions of a sloppy line
    pub const LINE_STEPS: u32 = 8;
    /// Seed stride between the passes of a sloppy line
    pub const PASS_SEED_STRIDE: u32 = 100;
    /// Index offset for the jittered midpoints of a sloppy rectangle
    pub const MIDPOINT_INDEX_OFFSET: u32 = 10;
    /// Samples around a sloppy ellipse
    pub const ELLIPSE_SAMPLES: u32 = 24;
}

/// Selection frame and hit-test constants
pub mod selection {
    use crate::config::Color;

    /// Distance between an element's box and its dashed selection frame
    pub const FRAME_PADDING: f32 = 6.0;
    /// Radius of the drawn resize handles
    pub const HANDLE_RADIUS: f32 = 6.0;
    /// Grab radius around a resize handle center
    pub const HANDLE_HIT_RADIUS: f32 = 10.0;
    /// Margin added around an element's box when hit-testing
    pub const HIT_MARGIN: f32 = 10.0;
    /// Dash intervals of the selection frame
    pub const FRAME_DASH: [f32; 2] = [5.0, 5.0];
    pub const ACCENT: Color = Color::rgb(0.2, 0.5, 1.0);
    pub const HANDLE_FILL: Color = Color::WHITE;
}

/// Highlighter overrides
pub mod highlighter {
    use crate::config::Color;

    pub const COLOR: Color = Color::rgb(1.0, 0.92, 0.0);
    pub const ALPHA: f32 = 0.4;
    /// Multiplier applied to the element's stored stroke width
    pub const WIDTH_FACTOR: f32 = 4.0;
}

/// Redaction placeholder constants
pub mod redact {
    use crate::config::Color;

    /// Checkerboard cell size in pixels
    pub const CELL: f32 = 10.0;
    pub const BASE: Color = Color::rgba(0.5, 0.5, 0.5, 0.6);
    pub const DARK_CELL: Color = Color::rgba(0.25, 0.25, 0.25, 0.6);
    pub const BORDER: Color = Color::rgb(0.2, 0.2, 0.2);
    pub const BORDER_DASH: [f32; 2] = [4.0, 4.0];
    pub const BORDER_WIDTH: f32 = 2.0;
}

/// Text layout constants
pub mod text {
    /// Line pitch as a multiple of the font size
    pub const LINE_HEIGHT: f32 = 1.3;

    /// Split label text into lines, accepting both `\n` and `\r\n` breaks
    pub fn lines(text: &str) -> impl Iterator<Item = &str> {
        text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// Vertical distance between consecutive line tops
    pub fn line_pitch(font_size: f32) -> f32 {
        font_size * LINE_HEIGHT
    }
}

/// Shapes smaller than this on both axes are discarded on commit
pub const MIN_SHAPE_EXTENT: f32 = 2.0;

/// Hash a seed and an index into 0.0..1.0
fn unit_noise(seed: u32, n: u32) -> f32 {
    let x = (f64::from(seed) * 12.9898 + f64::from(n) * 78.233).sin() * 43_758.545_3;
    (x - x.floor()) as f32
}

/// Deterministic jitter offset for point `index` of the element seeded with `seed`
pub fn offset(seed: u32, index: u32, sloppiness: Sloppiness) -> (f32, f32) {
    let amplitude = match sloppiness {
        Sloppiness::None => return (0.0, 0.0),
        Sloppiness::Low => jitter::AMPLITUDE_LOW,
        Sloppiness::High => jitter::AMPLITUDE_HIGH,
    };
    let dx = (unit_noise(seed, index.wrapping_mul(2)) - 0.5) * amplitude;
    let dy = (unit_noise(seed, index.wrapping_mul(2).wrapping_add(1)) - 0.5) * amplitude;
    (dx, dy)
}

fn jittered(p: Point, seed: u32, index: u32, sloppiness: Sloppiness) -> Point {
    let (dx, dy) = offset(seed, index, sloppiness);
    Point::new(p.x + dx, p.y + dy)
}

/// Polylines making up a sloppy line, one per pass
///
/// Sloppiness 0 yields the exact two-point segment.
pub fn sloppy_line(from: Point, to: Point, seed: u32, sloppiness: Sloppiness) -> Vec<Vec<Point>> {
    let passes = match sloppiness {
        Sloppiness::None => return vec![vec![from, to]],
        Sloppiness::Low => 1,
        Sloppiness::High => 2,
    };
    (0..passes)
        .map(|pass| {
            let pass_seed = seed.wrapping_add(pass * jitter::PASS_SEED_STRIDE);
            (0..=jitter::LINE_STEPS)
                .map(|step| {
                    let t = step as f32 / jitter::LINE_STEPS as f32;
                    jittered(from.lerp(to, t), pass_seed, step, sloppiness)
                })
                .collect()
        })
        .collect()
}

/// One edge of a sloppy rectangle: a quadratic curve to `to` via `ctrl`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSegment {
    pub ctrl: Point,
    pub to: Point,
}

/// Start point and the four edges of a sloppy rectangle, walking clockwise from top-left
pub fn sloppy_rect(
    bounds: &Bounds,
    seed: u32,
    sloppiness: Sloppiness,
) -> (Point, [CurveSegment; 4]) {
    let [nw, ne, sw, se] = bounds.corners();
    let walk = [nw, ne, se, sw];
    let corners: [Point; 4] =
        std::array::from_fn(|i| jittered(walk[i], seed, i as u32, sloppiness));
    let edges = std::array::from_fn(|i| {
        let next = corners[(i + 1) % 4];
        let mid = corners[i].midpoint(next);
        CurveSegment {
            ctrl: jittered(
                mid,
                seed,
                i as u32 + jitter::MIDPOINT_INDEX_OFFSET,
                sloppiness,
            ),
            to: next,
        }
    });
    (corners[0], edges)
}

/// Closed polyline approximating a sloppy ellipse
pub fn sloppy_ellipse(
    center: Point,
    rx: f32,
    ry: f32,
    seed: u32,
    sloppiness: Sloppiness,
) -> Vec<Point> {
    (0..jitter::ELLIPSE_SAMPLES)
        .map(|i| {
            let t = i as f32 / jitter::ELLIPSE_SAMPLES as f32 * TAU;
            let p = Point::new(center.x + rx * t.cos(), center.y + ry * t.sin());
            jittered(p, seed, i, sloppiness)
        })
        .collect()
}

/// Ellipse center and radii from a normalized box
pub fn ellipse_from_bounds(bounds: &Bounds) -> (Point, f32, f32) {
    (
        bounds.center(),
        bounds.width() * 0.5,
        bounds.height() * 0.5,
    )
}

/// End points of the two arrowhead segments drawn from `tip`
pub fn arrow_head_points(tail: Point, tip: Point) -> [Point; 2] {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    [angle - arrow::HEAD_ANGLE, angle + arrow::HEAD_ANGLE].map(|a| {
        Point::new(
            tip.x - arrow::HEAD_LENGTH * a.cos(),
            tip.y - arrow::HEAD_LENGTH * a.sin(),
        )
    })
}

/// Whether a drag from `from` to `to` is too small to keep
pub fn is_degenerate(from: Point, to: Point) -> bool {
    (to.x - from.x).abs() < MIN_SHAPE_EXTENT && (to.y - from.y).abs() < MIN_SHAPE_EXTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_deterministic() {
        for seed in [0, 1, 12345, u32::MAX] {
            for index in 0..30 {
                assert_eq!(
                    offset(seed, index, Sloppiness::High),
                    offset(seed, index, Sloppiness::High)
                );
            }
        }
    }

    #[test]
    fn test_offset_zero_without_sloppiness() {
        for index in 0..30 {
            assert_eq!(offset(99, index, Sloppiness::None), (0.0, 0.0));
        }
    }

    #[test]
    fn test_offset_amplitudes() {
        let mut varied = false;
        for index in 0..200 {
            let (dx, dy) = offset(4242, index, Sloppiness::Low);
            assert!(dx.abs() <= 1.0 && dy.abs() <= 1.0);
            let (hx, hy) = offset(4242, index, Sloppiness::High);
            assert!(hx.abs() <= 2.5 && hy.abs() <= 2.5);
            varied |= dx != 0.0;
        }
        assert!(varied);
    }

    #[test]
    fn test_sloppy_line_passes() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(80.0, 0.0);
        assert_eq!(sloppy_line(a, b, 5, Sloppiness::None), vec![vec![a, b]]);

        let low = sloppy_line(a, b, 5, Sloppiness::Low);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].len(), 9);

        let high = sloppy_line(a, b, 5, Sloppiness::High);
        assert_eq!(high.len(), 2);
        assert_ne!(high[0], high[1]);
        for (step, p) in high[0].iter().enumerate() {
            assert!((p.x - step as f32 * 10.0).abs() <= 2.5);
        }
    }

    #[test]
    fn test_exact_rect_walks_corners() {
        let b = Bounds::from_corners(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        let (start, edges) = sloppy_rect(&b, 3, Sloppiness::None);
        assert_eq!(start, Point::new(10.0, 10.0));
        let ends: Vec<Point> = edges.iter().map(|e| e.to).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(110.0, 10.0),
                Point::new(110.0, 60.0),
                Point::new(10.0, 60.0),
                Point::new(10.0, 10.0)
            ]
        );
        assert_eq!(edges[0].ctrl, Point::new(60.0, 10.0));
    }

    #[test]
    fn test_sloppy_ellipse_samples() {
        let pts = sloppy_ellipse(Point::new(50.0, 50.0), 40.0, 20.0, 8, Sloppiness::None);
        assert_eq!(pts.len(), 24);
        assert!((pts[0].x - 90.0).abs() < 1e-4);
        assert!((pts[6].y - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_arrow_head_points() {
        let [h1, h2] = arrow_head_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let tip = Point::new(100.0, 0.0);
        assert!((h1.distance(tip) - 15.0).abs() < 1e-4);
        assert!((h2.distance(tip) - 15.0).abs() < 1e-4);
        assert!((h1.y + h2.y).abs() < 1e-4);
        let angle = (h2.y - tip.y).atan2(tip.x - h2.x).abs();
        assert!((angle - std::f32::consts::FRAC_PI_6).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_drags() {
        let p = Point::new(10.0, 10.0);
        assert!(is_degenerate(p, Point::new(11.0, 11.5)));
        assert!(!is_degenerate(p, Point::new(110.0, 10.0)));
    }
}
