//! Interaction state of the tool controller

use crate::annotations::text::TextPrompt;
use crate::domain::{ElementId, ElementKind, Handle, Point, Scene, Shape};

/// Controller state as visible to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    DrawingShape,
    DrawingFreehandPath,
    MovingElement,
    ResizingElement,
    TextEditorOpen,
}

/// Controller state with the data each gesture needs
///
/// Gestures that mutate existing elements work on `draft`, a copy of the
/// scene that replaces the host's scene on release.
#[derive(Debug, Clone, Default)]
pub(crate) enum Interaction {
    #[default]
    Idle,
    DrawingShape {
        kind: ElementKind,
        start: Point,
        current: Point,
        seed: u32,
    },
    DrawingFreehandPath {
        draft: Scene,
        id: ElementId,
    },
    MovingElement {
        draft: Scene,
        id: ElementId,
        /// Pointer position minus the element anchor at grab time
        offset: Point,
        moved: bool,
    },
    ResizingElement {
        draft: Scene,
        id: ElementId,
        handle: Handle,
        /// Shape at grab time; every move resizes from this, not the draft
        original: Shape,
        start: Point,
        moved: bool,
    },
    TextEditorOpen(TextPrompt),
}

impl Interaction {
    pub(crate) fn mode(&self) -> EditorMode {
        match self {
            Interaction::Idle => EditorMode::Idle,
            Interaction::DrawingShape { .. } => EditorMode::DrawingShape,
            Interaction::DrawingFreehandPath { .. } => EditorMode::DrawingFreehandPath,
            Interaction::MovingElement { .. } => EditorMode::MovingElement,
            Interaction::ResizingElement { .. } => EditorMode::ResizingElement,
            Interaction::TextEditorOpen(_) => EditorMode::TextEditorOpen,
        }
    }

    /// Working copy of the scene while a gesture is mutating it
    pub(crate) fn draft(&self) -> Option<&Scene> {
        match self {
            Interaction::DrawingFreehandPath { draft, .. }
            | Interaction::MovingElement { draft, .. }
            | Interaction::ResizingElement { draft, .. } => Some(draft),
            _ => None,
        }
    }
}
