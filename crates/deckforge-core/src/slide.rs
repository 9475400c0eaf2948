//! Slides, their elements and element groups.

use crate::elements::{
    Element, ElementId, GroupId, NewElement, SerializableColor, SizeLimits, new_id,
};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for slides.
pub type SlideId = String;

/// A set of elements manipulated as one.
///
/// The group is the canonical owner of membership; `Element::group_id` is an
/// index rebuilt from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub members: BTreeSet<ElementId>,
}

impl Group {
    pub fn new(members: BTreeSet<ElementId>) -> Self {
        Self {
            id: new_id(),
            members,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }
}

/// A slide: elements plus slide-level attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub groups: Vec<Group>,
    pub background: SerializableColor,
    pub text_color: SerializableColor,
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

impl Slide {
    /// Create an empty white slide.
    pub fn new() -> Self {
        Self {
            id: new_id(),
            elements: Vec::new(),
            groups: Vec::new(),
            background: SerializableColor::white(),
            text_color: SerializableColor::black(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Stacking position for a newly added element: above everything.
    pub fn next_z_index(&self) -> i64 {
        self.elements.iter().map(|e| e.z_index).fold(0, i64::max) + 1
    }

    /// Insert an inbound element with a fresh id on top of the stack.
    pub fn insert(&mut self, element: NewElement, limits: SizeLimits) -> ElementId {
        let element = element.into_element(self.next_z_index(), limits);
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element, pruning it from its group.
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        let element = self.elements.remove(index);
        if element.group_id.is_some() {
            self.rebuild_group_index();
        }
        Some(element)
    }

    /// Elements in stacking order (back to front).
    pub fn elements_ordered(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Topmost element under a canvas point.
    pub fn element_at(&self, point: kurbo::Point, tolerance: f64) -> Option<&Element> {
        self.elements_ordered()
            .into_iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
    }

    /// Union of the bounds of the given elements. Unknown ids are skipped.
    pub fn bounds_of<'a>(&self, ids: impl IntoIterator<Item = &'a ElementId>) -> Option<Rect> {
        ids.into_iter()
            .filter_map(|id| self.element(id))
            .map(Element::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// The group an element belongs to.
    pub fn group_of(&self, element_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(element_id))
    }

    /// Bounding box of a group, computed from its members.
    pub fn group_bounds(&self, group_id: &str) -> Option<Rect> {
        self.group(group_id)
            .and_then(|group| self.bounds_of(group.members.iter()))
    }

    /// Bind elements into a new group.
    ///
    /// Unknown ids are ignored; fewer than 2 remaining ids is a no-op.
    /// Members of other groups are moved out of them first.
    pub fn create_group<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a ElementId>,
    ) -> Option<GroupId> {
        let members: BTreeSet<ElementId> = ids
            .into_iter()
            .filter(|id| self.contains(id))
            .cloned()
            .collect();
        if members.len() < 2 {
            return None;
        }

        for group in &mut self.groups {
            group.members.retain(|id| !members.contains(id));
        }

        let group = Group::new(members);
        let group_id = group.id.clone();
        self.groups.push(group);
        self.rebuild_group_index();
        Some(group_id)
    }

    /// Remove a group, returning its former members.
    pub fn dissolve_group(&mut self, group_id: &str) -> Option<Vec<ElementId>> {
        let index = self.groups.iter().position(|g| g.id == group_id)?;
        let group = self.groups.remove(index);
        self.rebuild_group_index();
        Some(group.members.into_iter().collect())
    }

    /// Recompute every element's `group_id` from the groups.
    ///
    /// Members that no longer exist are pruned and groups left with fewer
    /// than 2 members are dissolved.
    pub fn rebuild_group_index(&mut self) {
        let existing: BTreeSet<&str> = self.elements.iter().map(|e| e.id.as_str()).collect();
        for group in &mut self.groups {
            group.members.retain(|id| existing.contains(id.as_str()));
        }
        self.groups.retain(|g| g.members.len() >= 2);

        for element in &mut self.elements {
            element.group_id = self
                .groups
                .iter()
                .find(|g| g.contains(&element.id))
                .map(|g| g.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Geometry;

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
    fn test_z_index_assignment() {
        let (mut slide, ids) = slide_with(3);
        let z: Vec<i64> = ids.iter().map(|id| slide.element(id).unwrap().z_index).collect();
        assert_eq!(z, vec![1, 2, 3]);

        slide.element_mut(&ids[0]).unwrap().z_index = 10;
        assert_eq!(slide.next_z_index(), 11);
    }

    #[test]
    fn test_z_index_with_negative_values() {
        let (mut slide, ids) = slide_with(1);
        slide.element_mut(&ids[0]).unwrap().z_index = -4;
        assert_eq!(slide.next_z_index(), 1);
    }

    #[test]
    fn test_create_group_stamps_members() {
        let (mut slide, ids) = slide_with(3);
        let group_id = slide.create_group(&ids[..2]).unwrap();

        assert_eq!(slide.element(&ids[0]).unwrap().group_id.as_deref(), Some(group_id.as_str()));
        assert_eq!(slide.element(&ids[1]).unwrap().group_id.as_deref(), Some(group_id.as_str()));
        assert_eq!(slide.element(&ids[2]).unwrap().group_id, None);
    }

    #[test]
    fn test_create_group_needs_two_existing() {
        let (mut slide, ids) = slide_with(1);
        let missing = "missing".to_string();
        assert!(slide.create_group([&ids[0], &missing]).is_none());
        assert!(slide.groups.is_empty());
    }

    #[test]
    fn test_regroup_moves_members() {
        let (mut slide, ids) = slide_with(4);
        let first = slide.create_group(&ids[..2]).unwrap();
        let second = slide.create_group(&ids[1..4]).unwrap();

        // First group lost a member and dissolved.
        assert!(slide.group(&first).is_none());
        assert_eq!(slide.element(&ids[0]).unwrap().group_id, None);
        assert_eq!(slide.group(&second).unwrap().members.len(), 3);
    }

    #[test]
    fn test_dissolve_group_clears_members() {
        let (mut slide, ids) = slide_with(2);
        let group_id = slide.create_group(&ids).unwrap();
        let members = slide.dissolve_group(&group_id).unwrap();

        assert_eq!(members.len(), 2);
        assert!(slide.groups.is_empty());
        assert!(slide.elements.iter().all(|e| e.group_id.is_none()));
        assert!(slide.dissolve_group(&group_id).is_none());
    }

    #[test]
    fn test_remove_element_prunes_group() {
        let (mut slide, ids) = slide_with(3);
        let group_id = slide.create_group(&ids).unwrap();

        slide.remove_element(&ids[0]);
        assert_eq!(slide.group(&group_id).unwrap().members.len(), 2);

        slide.remove_element(&ids[1]);
        assert!(slide.group(&group_id).is_none());
        assert_eq!(slide.element(&ids[2]).unwrap().group_id, None);
    }

    #[test]
    fn test_group_bounds() {
        let (mut slide, ids) = slide_with(3);
        let group_id = slide.create_group([&ids[0], &ids[2]]).unwrap();
        let bounds = slide.group_bounds(&group_id).unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 260.0, 40.0));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut slide = Slide::new();
        let back = slide.insert(
            NewElement::rectangle(Geometry::new(0.0, 0.0, 100.0, 100.0)),
            SizeLimits::default(),
        );
        let front = slide.insert(
            NewElement::rectangle(Geometry::new(50.0, 50.0, 100.0, 100.0)),
            SizeLimits::default(),
        );

        assert_eq!(slide.element_at(kurbo::Point::new(75.0, 75.0), 0.0).unwrap().id, front);
        assert_eq!(slide.element_at(kurbo::Point::new(25.0, 25.0), 0.0).unwrap().id, back);
        assert!(slide.element_at(kurbo::Point::new(400.0, 400.0), 0.0).is_none());
    }
}
