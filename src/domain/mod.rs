//! Pure domain types with minimal dependencies
//!
//! This module contains the scene model shared by rendering, hit-testing
//! and the tool controller. Nothing here touches a drawing surface.

pub mod element;
pub mod geometry;
pub mod scene;
pub mod selection;

pub use element::*;
pub use geometry::*;
pub use scene::*;
pub use selection::*;
