//! Focused element and multi-selection state.

use crate::elements::{ElementId, GroupId};
use crate::slide::Slide;
use std::collections::BTreeSet;

/// Which elements the user is working on.
///
/// UI state only: never persisted and never recorded in history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// The focused element (handles are drawn on it).
    active: Option<ElementId>,
    /// Every selected element, including the focused one.
    selected: BTreeSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ElementId> {
        self.active.as_ref()
    }

    pub fn selected(&self) -> &BTreeSet<ElementId> {
        &self.selected
    }

    /// Selected ids as an owned list.
    pub fn ids(&self) -> Vec<ElementId> {
        self.selected.iter().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Replace the selection with a single element, or clear it.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected.clear();
        if let Some(id) = &id {
            self.selected.insert(id.clone());
        }
        self.active = id;
    }

    /// Select an element together with the rest of its group.
    pub fn select_with_group(&mut self, id: ElementId, slide: &Slide) {
        self.selected.clear();
        if let Some(group) = slide.group_of(&id) {
            self.selected.extend(group.members.iter().cloned());
        }
        self.selected.insert(id.clone());
        self.active = Some(id);
    }

    /// Add or remove an element (shift-click).
    ///
    /// Focus follows the last added element; removing the focused element
    /// moves focus to another selected one.
    pub fn toggle(&mut self, id: ElementId) {
        if self.selected.remove(&id) {
            if self.active.as_ref() == Some(&id) {
                self.active = self.selected.iter().next_back().cloned();
            }
        } else {
            self.selected.insert(id.clone());
            self.active = Some(id);
        }
    }

    /// Replace the selection with `ids`. The last one becomes focused.
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selected.clear();
        self.active = None;
        for id in ids {
            self.selected.insert(id.clone());
            self.active = Some(id);
        }
    }

    /// Select every element of a slide.
    pub fn select_all(&mut self, slide: &Slide) {
        let active = self.active.take();
        self.selected = slide.elements.iter().map(|e| e.id.clone()).collect();
        self.active = active
            .filter(|id| self.selected.contains(id))
            .or_else(|| slide.elements_ordered().last().map(|e| e.id.clone()));
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.selected.clear();
    }

    /// Drop a single id.
    pub fn remove(&mut self, id: &str) {
        self.selected.remove(id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    /// Drop ids that no longer exist on the slide.
    pub fn retain_existing(&mut self, slide: &Slide) {
        self.selected.retain(|id| slide.contains(id));
        if self.active.as_ref().is_some_and(|id| !slide.contains(id)) {
            self.active = None;
        }
    }

    /// The group the selection resolves to, if any.
    ///
    /// All selected elements must share one group. The group may have more
    /// members than are selected.
    pub fn resolve_group(&self, slide: &Slide) -> Option<GroupId> {
        let mut ids = self.selected.iter();
        let first = slide.element(ids.next()?)?.group_id.clone()?;
        for id in ids {
            if slide.element(id)?.group_id.as_ref() != Some(&first) {
                return None;
            }
        }
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Geometry, NewElement, SizeLimits};

    fn slide_with(count: usize) -> (Slide, Vec<ElementId>) {
        let mut slide = Slide::new();
        let ids = (0..count)
            .map(|i| {
                slide.insert(
                    NewElement::rectangle(Geometry::new(i as f64 * 100.0, 0.0, 60.0, 40.0)),
                    SizeLimits::default(),
                )
            })
            .collect();
        (slide, ids)
    }

    #[test]
    fn test_select_replaces() {
        let mut selection = Selection::new();
        selection.select(Some("a".to_string()));
        selection.select(Some("b".to_string()));
        assert_eq!(selection.active().map(String::as_str), Some("b"));
        assert_eq!(selection.len(), 1);

        selection.select(None);
        assert!(selection.is_empty());
        assert!(selection.active().is_none());
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        selection.toggle("a".to_string());
        selection.toggle("b".to_string());
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.active().map(String::as_str), Some("b"));

        selection.toggle("b".to_string());
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.active().map(String::as_str), Some("a"));

        selection.toggle("a".to_string());
        assert!(selection.is_empty());
        assert!(selection.active().is_none());
    }

    #[test]
    fn test_select_with_group() {
        let (mut slide, ids) = slide_with(3);
        slide.create_group(&ids[..2]);

        let mut selection = Selection::new();
        selection.select_with_group(ids[0].clone(), &slide);
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(&ids[1]));
        assert_eq!(selection.active(), Some(&ids[0]));

        selection.select_with_group(ids[2].clone(), &slide);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_select_all_and_retain() {
        let (mut slide, ids) = slide_with(3);
        let mut selection = Selection::new();
        selection.select_all(&slide);
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.active(), Some(&ids[2]));

        slide.remove_element(&ids[2]);
        selection.retain_existing(&slide);
        assert_eq!(selection.len(), 2);
        assert!(selection.active().is_none());
    }

    #[test]
    fn test_resolve_group() {
        let (mut slide, ids) = slide_with(4);
        let group_id = slide.create_group(&ids[..3]).unwrap();
        let mut selection = Selection::new();

        // Exact membership.
        selection.set_selected(ids[..3].iter().cloned());
        assert_eq!(selection.resolve_group(&slide), Some(group_id.clone()));

        // Subset of the group still resolves.
        selection.set_selected([ids[0].clone()]);
        assert_eq!(selection.resolve_group(&slide), Some(group_id));

        // Mixed with an ungrouped element.
        selection.set_selected([ids[0].clone(), ids[3].clone()]);
        assert_eq!(selection.resolve_group(&slide), None);

        selection.clear();
        assert_eq!(selection.resolve_group(&slide), None);
    }
}
