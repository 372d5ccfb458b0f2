//! Raster surface backed by tiny-skia
//!
//! Draws annotations onto a `Pixmap`, optionally on top of a background
//! `RgbaImage` that `clear` restores before every redraw.

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash,
    Transform,
};

use super::recording::PathOp;
use super::scene;
use super::surface::{MonospaceMetrics, Surface, TextMetrics};
use crate::config::Color;
use crate::domain::{AnnotationElement, ElementId, Point};

/// Draws into a tiny-skia pixmap
///
/// There is no font engine behind this surface: text is measured with
/// fixed-advance metrics and each glyph is painted as a solid cell.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Option<Pixmap>,
    metrics: MonospaceMetrics,
    stroke_color: Color,
    fill_color: Color,
    width: f32,
    dash: Vec<f32>,
    alpha: f32,
    path: Vec<PathOp>,
}

impl PixmapSurface {
    /// Transparent surface; `None` for a zero-sized area
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self::with_pixmap(Pixmap::new(width, height)?, None))
    }

    /// Surface that draws over a copy of `img`
    pub fn from_image(img: &RgbaImage) -> Option<Self> {
        let background = pixmap_from_image(img)?;
        Some(Self::with_pixmap(background.clone(), Some(background)))
    }

    fn with_pixmap(pixmap: Pixmap, background: Option<Pixmap>) -> Self {
        Self {
            pixmap,
            background,
            metrics: MonospaceMetrics::default(),
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            width: 1.0,
            dash: Vec::new(),
            alpha: 1.0,
            path: Vec::new(),
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copy the current contents out as straight-alpha RGBA
    pub fn to_image(&self) -> RgbaImage {
        image_from_pixmap(&self.pixmap)
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba_u8();
        let a = (f32::from(a) * self.alpha.clamp(0.0, 1.0)).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }
}

/// Render a scene over `img` in place
pub fn render_onto_image(
    img: &mut RgbaImage,
    elements: &[AnnotationElement],
    selected: Option<ElementId>,
) {
    let Some(mut surface) = PixmapSurface::from_image(img) else {
        log::debug!("Cannot render onto an empty image");
        return;
    };
    scene::render(elements, selected, Some(&mut surface));
    *img = surface.to_image();
}

fn pixmap_from_image(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn image_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

fn build_path(ops: &[PathOp]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for op in ops {
        match *op {
            PathOp::MoveTo(p) => pb.move_to(p.x, p.y),
            PathOp::LineTo(p) => pb.line_to(p.x, p.y),
            PathOp::QuadTo(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
            PathOp::Close => pb.close(),
            PathOp::Rect(min, max) => {
                if let Some(rect) = tiny_skia::Rect::from_ltrb(min.x, min.y, max.x, max.y) {
                    pb.push_rect(rect);
                }
            }
            PathOp::Ellipse(c, rx, ry) => {
                if let Some(oval) =
                    tiny_skia::Rect::from_xywh(c.x - rx, c.y - ry, rx * 2.0, ry * 2.0)
                {
                    pb.push_oval(oval);
                }
            }
        }
    }
    pb.finish()
}

impl TextMetrics for PixmapSurface {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.measure_text(text, font_size)
    }
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        match &self.background {
            Some(background) => self.pixmap = background.clone(),
            None => self.pixmap.fill(tiny_skia::Color::TRANSPARENT),
        }
        self.path.clear();
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
        let Some(path) = build_path(&self.path) else {
            return;
        };
        let paint = self.paint(self.stroke_color);
        let stroke = Stroke {
            width: self.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            // An invalid pattern falls back to a solid line
            dash: StrokeDash::new(self.dash.clone(), 0.0),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill(&mut self) {
        let Some(path) = build_path(&self.path) else {
            return;
        };
        let paint = self.paint(self.fill_color);
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f32) {
        let advance = self.metrics.advance * font_size;
        let paint = self.paint(self.fill_color);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = origin.x + i as f32 * advance + advance * 0.1;
            let y = origin.y + font_size * 0.2;
            if let Some(cell) = tiny_skia::Rect::from_xywh(x, y, advance * 0.8, font_size * 0.75)
            {
                self.pixmap.fill_rect(cell, &paint, Transform::identity(), None);
            }
        }
    }
}
