//! Scene: the ordered element list, and the host-owned document around it

use std::ops::Deref;

use super::element::{AnnotationElement, ElementId};

/// Ordered element list; order is z-order (later elements draw on top)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    elements: Vec<AnnotationElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ElementId) -> Option<&AnnotationElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut AnnotationElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Append an element on top; an element whose id is already present is refused
    pub fn push(&mut self, element: AnnotationElement) -> bool {
        if self.get(element.id).is_some() {
            log::warn!("Refusing duplicate element id {}", element.id);
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn remove(&mut self, id: ElementId) -> Option<AnnotationElement> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    /// Highest id currently in use
    pub fn max_id(&self) -> Option<ElementId> {
        self.elements.iter().map(|e| e.id).max()
    }
}

impl Deref for Scene {
    type Target = [AnnotationElement];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl FromIterator<AnnotationElement> for Scene {
    /// Collect elements, dropping any whose id was already seen
    fn from_iter<I: IntoIterator<Item = AnnotationElement>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for element in iter {
            scene.push(element);
        }
        scene
    }
}

/// Host-owned editing state: the scene plus the current selection
///
/// The editor replaces `scene` wholesale on every committed mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub scene: Scene,
    pub selection: Option<ElementId>,
}

impl Document {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            selection: None,
        }
    }

    /// Currently selected element, if the selection still resolves
    pub fn selected(&self) -> Option<&AnnotationElement> {
        self.selection.and_then(|id| self.scene.get(id))
    }

    /// Replace the scene without `id`, clearing a matching selection in the same step
    ///
    /// Returns `false` (and leaves everything untouched) if `id` is not in the scene.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let mut next = self.scene.clone();
        if next.remove(id).is_none() {
            return false;
        }
        self.scene = next;
        if self.selection == Some(id) {
            self.selection = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Style;
    use crate::domain::{Point, Shape};

    fn rect(id: u64) -> AnnotationElement {
        AnnotationElement {
            id: ElementId(id),
            shape: Shape::Rectangle {
                anchor: Point::new(0.0, 0.0),
                corner: Point::new(10.0, 10.0),
            },
            style: Style::default(),
            seed: 7,
        }
    }

    #[test]
    fn test_push_refuses_duplicate_ids() {
        let mut scene = Scene::new();
        assert!(scene.push(rect(1)));
        assert!(!scene.push(rect(1)));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_removing_selected_element_clears_selection() {
        let mut doc = Document::new([rect(1), rect(2)].into_iter().collect());
        doc.selection = Some(ElementId(2));

        assert!(doc.remove_element(ElementId(2)));
        assert_eq!(doc.selection, None);
        assert_eq!(doc.scene.len(), 1);
    }

    #[test]
    fn test_removing_other_element_keeps_selection() {
        let mut doc = Document::new([rect(1), rect(2)].into_iter().collect());
        doc.selection = Some(ElementId(2));

        assert!(doc.remove_element(ElementId(1)));
        assert_eq!(doc.selection, Some(ElementId(2)));
        assert!(!doc.remove_element(ElementId(9)));
        assert_eq!(doc.selection, Some(ElementId(2)));
    }
}
