//! Tool controller
//!
//! `Editor` consumes pointer and keyboard events, dispatches them to the
//! per-tool logic and commits results into the host's `Document`.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::hit_test::{hit_test, resize_handle_at};
use super::text::{TextPrompt, clamp_font_size};
use crate::config::{EditorConfig, Style, Tool};
use crate::domain::{AnnotationElement, Document, ElementId, ElementKind, Point, Scene, Shape};
use crate::render::geometry::is_degenerate;
use crate::render::{Surface, TextMetrics, scene};
use crate::session::messages::{InputEvent, Key, Modifiers, Outcome};
use crate::session::shortcuts::{KeyAction, handle_key_event};
use crate::session::state::{EditorMode, Interaction};

/// Annotation editor state: tool, style and the gesture in progress
///
/// The scene and selection live in the host's `Document`, passed to every
/// call. Committed mutations replace `Document::scene` with a new list.
#[derive(Debug)]
pub struct Editor {
    tool: Tool,
    style: Style,
    font_size: f32,
    text_field_focus: bool,
    interaction: Interaction,
    next_id: u64,
    seeds: StdRng,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        let seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            tool: config.tool,
            style: config.style,
            font_size: clamp_font_size(config.font_size),
            text_field_focus: false,
            interaction: Interaction::Idle,
            next_id: 1,
            seeds,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn mode(&self) -> EditorMode {
        self.interaction.mode()
    }

    /// The open text prompt, for the host to present its dialog
    pub fn text_prompt(&self) -> Option<&TextPrompt> {
        match &self.interaction {
            Interaction::TextEditorOpen(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Whether keyboard shortcuts are suspended
    pub fn input_captured(&self) -> bool {
        self.text_field_focus || matches!(self.interaction, Interaction::TextEditorOpen(_))
    }

    /// Single input port: handle one host event to completion
    pub fn handle(&mut self, doc: &mut Document, event: InputEvent) -> Outcome {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(doc, p),
            InputEvent::PointerMove(p) => self.pointer_move(p),
            InputEvent::PointerUp(p) => self.finish_gesture(doc, Some(p)),
            InputEvent::PointerLeave => self.finish_gesture(doc, None),
            InputEvent::Key(key, modifiers) => self.key_press(doc, key, modifiers),
            InputEvent::SelectTool(tool) => self.select_tool(doc, tool),
            InputEvent::SetStyle(style) => {
                self.style = style;
                Outcome::default()
            }
            InputEvent::SetTextFieldFocus(focused) => {
                self.text_field_focus = focused;
                Outcome::default()
            }
            InputEvent::CancelText => self.close_prompt(),
        }
    }

    /// Commit the open text prompt
    ///
    /// Blank text closes the prompt without adding anything.
    pub fn submit_text(
        &mut self,
        doc: &mut Document,
        text: &str,
        font_size: f32,
        metrics: &dyn TextMetrics,
    ) -> Outcome {
        let Interaction::TextEditorOpen(prompt) = &self.interaction else {
            return Outcome::default();
        };
        let prompt = *prompt;
        self.interaction = Interaction::Idle;
        self.font_size = clamp_font_size(font_size);

        let closed = Outcome {
            prompt_changed: true,
            ..Outcome::default()
        };
        let Some(shape) = prompt.submit(text, font_size, metrics) else {
            log::debug!("Discarding empty text submission");
            return closed;
        };
        let seed = self.next_seed();
        closed.and(self.commit(doc, shape, seed))
    }

    /// Redraw the document, including any gesture in progress
    pub fn render(&self, doc: &Document, surface: Option<&mut dyn Surface>) {
        let Some(surface) = surface else {
            log::trace!("No drawing surface, skipping render");
            return;
        };
        let elements = self.interaction.draft().unwrap_or(&doc.scene);
        scene::render(elements, doc.selection, Some(&mut *surface));
        if let Some(preview) = self.preview() {
            scene::draw_element(surface, &preview);
        }
    }

    /// Uncommitted element for the shape being dragged out
    ///
    /// Its id is provisional; the committed element may get a higher one.
    pub fn preview(&self) -> Option<AnnotationElement> {
        let Interaction::DrawingShape {
            kind,
            start,
            current,
            seed,
        } = &self.interaction
        else {
            return None;
        };
        Some(AnnotationElement {
            id: ElementId(self.next_id),
            shape: Shape::from_drag(*kind, *start, *current)?,
            style: self.style,
            seed: *seed,
        })
    }

    // ============================================================================
    // Pointer handlers
    // ============================================================================

    fn pointer_down(&mut self, doc: &mut Document, p: Point) -> Outcome {
        let mut outcome = match self.interaction {
            Interaction::TextEditorOpen(_) => return Outcome::default(),
            Interaction::Idle => Outcome::default(),
            // A release never arrived; close out that gesture first
            _ => self.finish_gesture(doc, None),
        };

        outcome = outcome.and(match self.tool {
            Tool::Select => self.grab(doc, p),
            Tool::Eraser => self.erase_at(doc, p),
            Tool::Text => {
                self.interaction = Interaction::TextEditorOpen(TextPrompt::new(p, self.font_size));
                Outcome {
                    prompt_changed: true,
                    ..Outcome::default()
                }
            }
            Tool::Freehand => self.begin_stroke(doc, p, true),
            Tool::Highlighter => self.begin_stroke(doc, p, false),
            Tool::Line => self.begin_shape(ElementKind::Line, p),
            Tool::Arrow => self.begin_shape(ElementKind::Arrow, p),
            Tool::Rectangle => self.begin_shape(ElementKind::Rectangle, p),
            Tool::Ellipse => self.begin_shape(ElementKind::Ellipse, p),
            Tool::Redact => self.begin_shape(ElementKind::Redact, p),
        });
        outcome
    }

    fn pointer_move(&mut self, p: Point) -> Outcome {
        match &mut self.interaction {
            Interaction::Idle | Interaction::TextEditorOpen(_) => Outcome::default(),
            Interaction::DrawingShape { current, .. } => {
                *current = p;
                Outcome::redraw()
            }
            Interaction::DrawingFreehandPath { draft, id } => {
                if let Some(element) = draft.get_mut(*id)
                    && let Shape::Freehand { points } | Shape::Highlighter { points } =
                        &mut element.shape
                {
                    points.push(p);
                }
                Outcome::redraw()
            }
            Interaction::MovingElement {
                draft,
                id,
                offset,
                moved,
            } => {
                if let Some(element) = draft.get_mut(*id)
                    && let Some(anchor) = element.anchor()
                {
                    let delta = (p - *offset) - anchor;
                    if delta != Point::default() {
                        element.shape.translate(delta);
                        *moved = true;
                    }
                }
                Outcome::redraw()
            }
            Interaction::ResizingElement {
                draft,
                id,
                handle,
                original,
                start,
                moved,
            } => {
                if let Some(element) = draft.get_mut(*id)
                    && let Some((anchor, corner)) = original.resize_frame()
                {
                    let (anchor, corner) = handle.resize(anchor, corner, p);
                    let mut shape = original.clone();
                    shape.set_endpoints(anchor, corner);
                    element.shape = shape;
                    *moved |= p != *start;
                }
                Outcome::redraw()
            }
        }
    }

    /// Pointer released or left the surface: end the gesture, committing its result
    fn finish_gesture(&mut self, doc: &mut Document, at: Option<Point>) -> Outcome {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => Outcome::default(),
            Interaction::TextEditorOpen(prompt) => {
                // The prompt is modal; releasing the click that opened it keeps it open
                self.interaction = Interaction::TextEditorOpen(prompt);
                Outcome::default()
            }
            Interaction::DrawingShape {
                kind,
                start,
                current,
                seed,
            } => {
                let end = at.unwrap_or(current);
                if is_degenerate(start, end) {
                    log::debug!("Discarding degenerate {kind:?}");
                    return Outcome::redraw();
                }
                match Shape::from_drag(kind, start, end) {
                    Some(shape) => self.commit(doc, shape, seed),
                    None => Outcome::redraw(),
                }
            }
            Interaction::DrawingFreehandPath { mut draft, id } => {
                if let Some(p) = at
                    && let Some(element) = draft.get_mut(id)
                    && let Shape::Freehand { points } | Shape::Highlighter { points } =
                        &mut element.shape
                    && points.last() != Some(&p)
                {
                    points.push(p);
                }
                log::debug!("Committed stroke {id}");
                doc.scene = draft;
                Outcome::scene()
            }
            Interaction::MovingElement {
                draft, id, moved, ..
            } => {
                if !moved {
                    return Outcome::default();
                }
                log::debug!("Moved element {id}");
                doc.scene = draft;
                Outcome::scene()
            }
            Interaction::ResizingElement {
                draft,
                id,
                handle,
                moved,
                ..
            } => {
                if !moved {
                    return Outcome::default();
                }
                log::debug!("Resized element {id} via {handle:?}");
                doc.scene = draft;
                Outcome::scene()
            }
        }
    }

    // ============================================================================
    // Tool handlers
    // ============================================================================

    /// Select tool: grab a resize handle of the selection, or an element, or nothing
    fn grab(&mut self, doc: &mut Document, p: Point) -> Outcome {
        if let Some(selected) = doc.selected()
            && let Some(handle) = resize_handle_at(p, selected)
        {
            self.interaction = Interaction::ResizingElement {
                draft: doc.scene.clone(),
                id: selected.id,
                handle,
                original: selected.shape.clone(),
                start: p,
                moved: false,
            };
            return Outcome::default();
        }

        let Some(id) = hit_test(p, &doc.scene) else {
            return match doc.selection.take() {
                Some(_) => Outcome::selection(),
                None => Outcome::default(),
            };
        };
        let Some(anchor) = doc.scene.get(id).and_then(AnnotationElement::anchor) else {
            return Outcome::default();
        };
        self.interaction = Interaction::MovingElement {
            draft: doc.scene.clone(),
            id,
            offset: p - anchor,
            moved: false,
        };
        if doc.selection == Some(id) {
            return Outcome::default();
        }
        doc.selection = Some(id);
        Outcome::selection()
    }

    fn erase_at(&mut self, doc: &mut Document, p: Point) -> Outcome {
        let Some(id) = hit_test(p, &doc.scene) else {
            return Outcome::default();
        };
        let was_selected = doc.selection == Some(id);
        if !doc.remove_element(id) {
            return Outcome::default();
        }
        log::debug!("Erased element {id}");
        Outcome {
            selection_changed: was_selected,
            ..Outcome::scene()
        }
    }

    fn begin_stroke(&mut self, doc: &Document, p: Point, freehand: bool) -> Outcome {
        let mut draft = doc.scene.clone();
        let Some(id) = self.allocate_id(&draft) else {
            return Outcome::default();
        };
        let points = vec![p];
        let shape = if freehand {
            Shape::Freehand { points }
        } else {
            Shape::Highlighter { points }
        };
        draft.push(AnnotationElement {
            id,
            shape,
            style: self.style,
            seed: self.next_seed(),
        });
        self.interaction = Interaction::DrawingFreehandPath { draft, id };
        Outcome::redraw()
    }

    fn begin_shape(&mut self, kind: ElementKind, p: Point) -> Outcome {
        self.interaction = Interaction::DrawingShape {
            kind,
            start: p,
            current: p,
            seed: self.next_seed(),
        };
        Outcome::redraw()
    }

    // ============================================================================
    // Keyboard and tool selection
    // ============================================================================

    fn key_press(&mut self, doc: &mut Document, key: Key, modifiers: Modifiers) -> Outcome {
        let Some(action) = handle_key_event(key, modifiers, self.input_captured()) else {
            return Outcome::default();
        };
        match action {
            KeyAction::SelectTool(tool) => self.select_tool(doc, tool),
            KeyAction::DeleteSelection => {
                let outcome = self.finish_gesture(doc, None);
                let Some(id) = doc.selection else {
                    return outcome;
                };
                if !doc.remove_element(id) {
                    // Selection pointed at nothing; drop it
                    doc.selection = None;
                    return outcome.and(Outcome::selection());
                }
                log::debug!("Deleted element {id}");
                outcome.and(Outcome {
                    selection_changed: true,
                    ..Outcome::scene()
                })
            }
            KeyAction::Escape => {
                let mut outcome = self.close_prompt();
                if doc.selection.take().is_some() {
                    outcome = outcome.and(Outcome::selection());
                }
                outcome
            }
        }
    }

    fn select_tool(&mut self, doc: &mut Document, tool: Tool) -> Outcome {
        let mut outcome = self.close_prompt().and(self.finish_gesture(doc, None));
        if tool != self.tool {
            log::debug!("Tool changed: {:?} -> {tool:?}", self.tool);
            self.tool = tool;
            outcome.tool_changed = true;
        }
        outcome
    }

    fn close_prompt(&mut self) -> Outcome {
        if !matches!(self.interaction, Interaction::TextEditorOpen(_)) {
            return Outcome::default();
        }
        self.interaction = Interaction::Idle;
        Outcome {
            prompt_changed: true,
            ..Outcome::default()
        }
    }

    // ============================================================================
    // Helper functions
    // ============================================================================

    /// Append a new element on top and replace the host's scene
    fn commit(&mut self, doc: &mut Document, shape: Shape, seed: u32) -> Outcome {
        let mut next: Scene = doc.scene.clone();
        let Some(id) = self.allocate_id(&next) else {
            return Outcome::redraw();
        };
        let kind = shape.kind();
        next.push(AnnotationElement {
            id,
            shape,
            style: self.style,
            seed,
        });
        doc.scene = next;
        log::debug!("Created {kind:?} {id}");
        Outcome::scene()
    }

    /// Fresh id, above every id already in `scene` and every id handed out before
    ///
    /// `None` once the id space is used up; `u64::MAX` itself is never handed out.
    fn allocate_id(&mut self, scene: &Scene) -> Option<ElementId> {
        let floor = scene.max_id().map_or(0, |id| id.0.saturating_add(1));
        let id = self.next_id.max(floor);
        let Some(next) = id.checked_add(1) else {
            log::warn!("Element ids exhausted, not creating a new element");
            return None;
        };
        self.next_id = next;
        Some(ElementId(id))
    }

    fn next_seed(&mut self) -> u32 {
        self.seeds.next_u32()
    }
}
