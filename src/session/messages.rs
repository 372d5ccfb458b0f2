//! Input events forwarded by the host, and what the editor reports back

use crate::config::{Style, Tool};
use crate::domain::Point;

/// Named keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Named {
    Delete,
    Backspace,
    Escape,
}

/// A key press, already decoded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Named(Named),
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Any modifier that turns a key into a host-level command
    pub fn command(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// Everything the host forwards into the editor
///
/// Pointer positions are in surface-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    /// Pointer left the drawing surface; treated like a release
    PointerLeave,
    Key(Key, Modifiers),
    /// Tool picked from the host's toolbar
    SelectTool(Tool),
    /// Style panel changed; applies to elements created from now on
    SetStyle(Style),
    /// Host moved keyboard focus into or out of one of its own text fields
    SetTextFieldFocus(bool),
    /// Text prompt dismissed without committing
    CancelText,
}

/// What changed while handling one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// `Document::scene` was replaced with a new list
    pub scene_changed: bool,
    /// `Document::selection` changed
    pub selection_changed: bool,
    /// The active tool changed (e.g. through a shortcut)
    pub tool_changed: bool,
    /// The text prompt opened or closed
    pub prompt_changed: bool,
    /// The host should call `Editor::render` again
    pub redraw: bool,
}

impl Outcome {
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn scene() -> Self {
        Self {
            scene_changed: true,
            redraw: true,
            ..Self::default()
        }
    }

    pub fn selection() -> Self {
        Self {
            selection_changed: true,
            redraw: true,
            ..Self::default()
        }
    }

    /// Merge another outcome into this one
    pub fn and(self, other: Outcome) -> Self {
        Self {
            scene_changed: self.scene_changed || other.scene_changed,
            selection_changed: self.selection_changed || other.selection_changed,
            tool_changed: self.tool_changed || other.tool_changed,
            prompt_changed: self.prompt_changed || other.prompt_changed,
            redraw: self.redraw || other.redraw,
        }
    }

    /// Whether anything happened at all
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}
