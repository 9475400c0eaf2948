//! The slide collection edited by a session.

use crate::elements::{Element, new_id};
use crate::error::DeckResult;
use crate::slide::{Slide, SlideId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered collection of slides.
///
/// This is the value history snapshots and the persistence pipeline see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck holding one blank slide.
    pub fn with_blank_slide() -> Self {
        Self {
            slides: vec![Slide::new()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn slide_mut(&mut self, id: &str) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Find an element and the slide holding it.
    pub fn find_element(&self, id: &str) -> Option<(&Slide, &Element)> {
        self.slides
            .iter()
            .find_map(|slide| slide.element(id).map(|element| (slide, element)))
    }

    /// The slide holding an element.
    pub fn slide_containing_mut(&mut self, element_id: &str) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.contains(element_id))
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.slides.iter_mut().find_map(|slide| slide.element_mut(id))
    }

    /// Insert a slide at `index` (clamped to the end).
    pub fn insert_slide(&mut self, index: usize, slide: Slide) -> SlideId {
        let id = slide.id.clone();
        let index = index.min(self.slides.len());
        self.slides.insert(index, slide);
        id
    }

    /// Append a slide.
    pub fn push_slide(&mut self, slide: Slide) -> SlideId {
        self.insert_slide(self.slides.len(), slide)
    }

    pub fn remove_slide(&mut self, id: &str) -> Option<Slide> {
        let index = self.slide_index(id)?;
        Some(self.slides.remove(index))
    }

    /// Copy a slide right after the original.
    ///
    /// The copy gets fresh slide, element and group ids; group membership
    /// is carried over to the new element ids.
    pub fn duplicate_slide(&mut self, id: &str) -> Option<SlideId> {
        let index = self.slide_index(id)?;
        let mut copy = self.slides[index].clone();
        copy.id = new_id();

        let mut renamed: HashMap<String, String> = HashMap::new();
        for element in &mut copy.elements {
            let old = std::mem::take(&mut element.id);
            element.regenerate_id();
            renamed.insert(old, element.id.clone());
        }
        for group in &mut copy.groups {
            group.id = new_id();
            group.members = group
                .members
                .iter()
                .filter_map(|member| renamed.get(member).cloned())
                .collect();
        }
        copy.rebuild_group_index();

        Some(self.insert_slide(index + 1, copy))
    }

    /// Move the slide at `from` to position `to`.
    pub fn move_slide(&mut self, from: usize, to: usize) -> bool {
        if from >= self.slides.len() || to >= self.slides.len() || from == to {
            return false;
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        true
    }

    /// Serialize the deck to JSON.
    pub fn to_json(&self) -> DeckResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a deck from JSON.
    ///
    /// Group indexes are rebuilt, so stale `groupId` values in the input
    /// are ignored.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let mut deck: Self = serde_json::from_str(json)?;
        for slide in &mut deck.slides {
            slide.rebuild_group_index();
        }
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Geometry, NewElement, SizeLimits};

    fn deck_with_grouped_slide() -> (Deck, SlideId) {
        let mut slide = Slide::new();
        let a = slide.insert(
            NewElement::rectangle(Geometry::new(0.0, 0.0, 60.0, 40.0)),
            SizeLimits::default(),
        );
        let b = slide.insert(
            NewElement::text(Geometry::new(100.0, 0.0, 200.0, 40.0), "Hello", 24.0),
            SizeLimits::default(),
        );
        slide.create_group([&a, &b]);
        let mut deck = Deck::new();
        let id = deck.push_slide(slide);
        (deck, id)
    }

    #[test]
    fn test_duplicate_slide_fresh_ids() {
        let (mut deck, id) = deck_with_grouped_slide();
        let copy_id = deck.duplicate_slide(&id).unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides[1].id, copy_id);

        let original = deck.slide(&id).unwrap();
        let copy = deck.slide(&copy_id).unwrap();
        assert_eq!(copy.len(), original.len());
        for element in &copy.elements {
            assert!(!original.contains(&element.id));
        }

        // Group carried over with remapped members.
        assert_eq!(copy.groups.len(), 1);
        assert_ne!(copy.groups[0].id, original.groups[0].id);
        assert!(copy.elements.iter().all(|e| e.group_id.as_deref() == Some(copy.groups[0].id.as_str())));
    }

    #[test]
    fn test_duplicate_missing_slide() {
        let (mut deck, _) = deck_with_grouped_slide();
        assert!(deck.duplicate_slide("nope").is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_move_slide() {
        let mut deck = Deck::new();
        let a = deck.push_slide(Slide::new());
        let b = deck.push_slide(Slide::new());
        let c = deck.push_slide(Slide::new());

        assert!(deck.move_slide(0, 2));
        let order: Vec<&str> = deck.slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);

        assert!(!deck.move_slide(1, 1));
        assert!(!deck.move_slide(0, 5));
    }

    #[test]
    fn test_json_roundtrip_rebuilds_group_index() {
        let (deck, id) = deck_with_grouped_slide();
        let json = deck.to_json().unwrap();
        let loaded = Deck::from_json(&json).unwrap();
        assert_eq!(loaded, deck);

        // A stale back-reference in the input is replaced by the derived one.
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["slides"][0]["groups"] = serde_json::json!([]);
        let loaded = Deck::from_json(&value.to_string()).unwrap();
        let slide = loaded.slide(&id).unwrap();
        assert!(slide.elements.iter().all(|e| e.group_id.is_none()));
    }

    #[test]
    fn test_find_element() {
        let (deck, id) = deck_with_grouped_slide();
        let element_id = deck.slides[0].elements[1].id.clone();
        let (slide, element) = deck.find_element(&element_id).unwrap();
        assert_eq!(slide.id, id);
        assert!(element.is_text());
        assert!(deck.find_element("missing").is_none());
    }
}
