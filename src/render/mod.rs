//! Annotation rendering module
//!
//! This module contains:
//! - The drawing surface port the pipeline draws through
//! - Geometry and jitter calculations shared with hit-testing
//! - The scene render pipeline
//! - A recording surface and a tiny-skia raster surface

pub mod geometry;
pub mod image;
pub mod recording;
pub mod scene;
pub mod surface;

pub use scene::render;
pub use surface::{MonospaceMetrics, Surface, TextMetrics};
