//! Scribble: a hand-drawn style annotation engine
//!
//! The host owns a [`Document`] (the element list plus the selection) and
//! forwards pointer and keyboard input to an [`Editor`]. The editor commits
//! each mutation by replacing the document's scene, and draws everything
//! through the [`Surface`] port.

pub mod annotations;
pub mod config;
pub mod domain;
pub mod render;
pub mod session;

pub use annotations::handlers::Editor;
pub use annotations::text::TextPrompt;
pub use config::{Color, EditorConfig, Sloppiness, StrokeStyle, Style, Tool};
pub use domain::{AnnotationElement, Bounds, Document, ElementId, ElementKind, Point, Scene, Shape};
pub use render::{MonospaceMetrics, Surface, TextMetrics, render};
pub use session::messages::{InputEvent, Key, Modifiers, Named, Outcome};
pub use session::state::EditorMode;
