//! Editing session over a deck.
//!
//! [`Editor`] owns the deck and routes every committed mutation through the
//! history. Selection changes are never recorded. Operations whose
//! preconditions do not hold return `false`/`None`/empty and leave both the
//! deck and the history untouched.

use crate::arrange::{self, Alignment, Axis, Restack};
use crate::config::EditorConfig;
use crate::deck::Deck;
use crate::elements::{Element, ElementId, GroupId, NewElement};
use crate::history::History;
use crate::input::{Modifiers, PointerEvent};
use crate::selection::Selection;
use crate::slide::{Slide, SlideId};
use crate::transform::{HandleKind, Instant, LiveTransform, SessionOutcome, TransformEngine, handle_at};
use kurbo::Point;

/// A single local editor: deck, selection, transform sessions and history.
#[derive(Debug, Clone)]
pub struct Editor {
    deck: Deck,
    current_slide: SlideId,
    selection: Selection,
    engine: TransformEngine,
    history: History<Deck>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor over a deck with one blank slide.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_deck(Deck::with_blank_slide(), config)
    }

    /// Create an editor over an existing deck.
    ///
    /// An empty deck gets a blank slide. The history starts with the deck
    /// as its first entry, so the first edit can be undone.
    pub fn with_deck(mut deck: Deck, config: EditorConfig) -> Self {
        if deck.is_empty() {
            deck.push_slide(Slide::new());
        }
        for slide in &mut deck.slides {
            slide.rebuild_group_index();
        }
        let current_slide = deck.slides.first().map(|s| s.id.clone()).unwrap_or_default();
        let history = History::with_seed(deck.clone(), config.history_capacity);
        log::info!("Editor opened deck with {} slide(s)", deck.len());

        Self {
            deck,
            current_slide,
            selection: Selection::new(),
            engine: TransformEngine::new(&config),
            history,
            config,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Give up the editor and keep the deck.
    pub fn into_deck(mut self) -> Deck {
        self.settle();
        self.deck
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History<Deck> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The current single selection and multi-selection, read-only.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    /// Live geometry of the element under manipulation, for rendering.
    pub fn live(&self) -> Option<&LiveTransform> {
        self.engine.live()
    }

    pub fn current_slide_id(&self) -> &SlideId {
        &self.current_slide
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.deck.slide(&self.current_slide)
    }

    fn current_slide_mut(&mut self) -> Option<&mut Slide> {
        self.deck.slide_mut(&self.current_slide)
    }

    /// Update the screen to canvas scale factor.
    ///
    /// An open session is committed first at the old scale.
    pub fn set_scale(&mut self, scale: f64) {
        self.settle();
        self.engine.set_scale(scale);
    }

    /// Switch the slide being edited. The selection is cleared.
    pub fn set_current_slide(&mut self, id: &str) -> bool {
        if self.deck.slide(id).is_none() {
            log::debug!("Cannot switch to unknown slide {id}");
            return false;
        }
        self.settle();
        self.current_slide = id.to_string();
        self.selection.clear();
        true
    }

    // --- History ---

    fn record(&mut self, action: &str) {
        if self.history.record(self.deck.clone()) {
            log::debug!(
                "Recorded '{action}' ({}/{})",
                self.history.cursor() + 1,
                self.history.len()
            );
        }
    }

    /// Put a snapshot back in place.
    ///
    /// Restoring is itself a deck mutation; the history swallows the record
    /// it triggers and then leaves replay mode.
    fn restore(&mut self, snapshot: Deck) {
        self.deck = snapshot;
        self.record("restore");
        self.history.finish_replay();

        if self.deck.slide(&self.current_slide).is_none() {
            self.current_slide = self.deck.slides.first().map(|s| s.id.clone()).unwrap_or_default();
        }
        if let Some(slide) = self.deck.slide(&self.current_slide) {
            self.selection.retain_existing(slide);
        }
    }

    /// Step back to the previous snapshot.
    ///
    /// Returns the restored deck, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Deck> {
        self.settle();
        let snapshot = self.history.undo()?.clone();
        self.restore(snapshot);
        log::info!("Undo ({}/{})", self.history.cursor() + 1, self.history.len());
        Some(&self.deck)
    }

    /// Step forward to the next snapshot.
    pub fn redo(&mut self) -> Option<&Deck> {
        self.settle();
        let snapshot = self.history.redo()?.clone();
        self.restore(snapshot);
        log::info!("Redo ({}/{})", self.history.cursor() + 1, self.history.len());
        Some(&self.deck)
    }

    // --- Elements ---

    /// Insert elements handed over by a collaborator.
    ///
    /// Each gets a fresh id and a stacking position above everything on the
    /// slide. Geometry is clamped to the minimums.
    pub fn add_elements(&mut self, slide_id: &str, elements: Vec<NewElement>) -> Vec<ElementId> {
        if elements.is_empty() {
            return Vec::new();
        }
        self.settle();
        let limits = self.config.size_limits();
        let Some(slide) = self.deck.slide_mut(slide_id) else {
            log::debug!("Cannot add elements to unknown slide {slide_id}");
            return Vec::new();
        };
        let ids: Vec<ElementId> = elements
            .into_iter()
            .map(|element| slide.insert(element, limits))
            .collect();
        self.record("add elements");
        ids
    }

    /// Insert one element on the current slide.
    pub fn add_element(&mut self, element: NewElement) -> Option<ElementId> {
        let slide_id = self.current_slide.clone();
        self.add_elements(&slide_id, vec![element]).into_iter().next()
    }

    /// Modify an element in place.
    ///
    /// The id cannot be changed, geometry is clamped and group membership
    /// stays derived from the slide's groups. Records only if something
    /// changed.
    pub fn update_element(&mut self, id: &str, update: impl FnOnce(&mut Element)) -> bool {
        self.settle();
        let limits = self.config.size_limits();
        let Some(slide) = self.deck.slide_containing_mut(id) else {
            return false;
        };
        let Some(element) = slide.element_mut(id) else {
            return false;
        };
        let before = element.clone();
        update(element);
        element.id = before.id.clone();
        element.geometry = element.geometry.clamped(limits);
        slide.rebuild_group_index();

        let changed = slide.element(id) != Some(&before);
        if changed {
            self.record("update element");
        }
        changed
    }

    /// Delete elements from the current slide. Returns how many were removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        self.settle();
        let Some(slide) = self.current_slide_mut() else {
            return 0;
        };
        let removed = ids
            .iter()
            .filter(|id| slide.remove_element(id).is_some())
            .count();
        if removed == 0 {
            log::debug!("Nothing to delete");
            return 0;
        }
        if let Some(slide) = self.deck.slide(&self.current_slide) {
            self.selection.retain_existing(slide);
        }
        self.record("delete elements");
        removed
    }

    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        self.delete_elements(&ids)
    }

    /// Copy the selected elements with an offset.
    ///
    /// Copies get fresh ids, stack above everything in the originals' order
    /// and belong to no group. They become the selection.
    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        self.settle();
        let offset = self.config.duplicate_offset;
        let limits = self.config.size_limits();
        let selected = self.selection.selected().clone();
        let Some(slide) = self.current_slide_mut() else {
            return Vec::new();
        };

        let originals: Vec<Element> = slide
            .elements_ordered()
            .into_iter()
            .filter(|e| selected.contains(&e.id))
            .cloned()
            .collect();
        if originals.is_empty() {
            log::debug!("Nothing to duplicate");
            return Vec::new();
        }

        let mut z_index = slide.next_z_index();
        let mut ids = Vec::with_capacity(originals.len());
        for mut copy in originals {
            copy.regenerate_id();
            copy.group_id = None;
            copy.z_index = z_index;
            z_index += 1;
            copy.geometry.x += offset.x;
            copy.geometry.y += offset.y;
            copy.geometry = copy.geometry.clamped(limits);
            ids.push(copy.id.clone());
            slide.elements.push(copy);
        }

        self.selection.set_selected(ids.iter().cloned());
        self.record("duplicate elements");
        ids
    }

    // --- Slides ---

    /// Insert a blank slide after the current one and switch to it.
    pub fn add_slide(&mut self) -> SlideId {
        self.settle();
        let index = self
            .deck
            .slide_index(&self.current_slide)
            .map_or(self.deck.len(), |i| i + 1);
        let id = self.deck.insert_slide(index, Slide::new());
        log::info!("Added slide {id} at position {index}");
        self.current_slide = id.clone();
        self.selection.clear();
        self.record("add slide");
        id
    }

    /// Delete a slide. The last remaining slide cannot be deleted.
    pub fn delete_slide(&mut self, id: &str) -> bool {
        if self.deck.len() <= 1 {
            log::debug!("Refusing to delete the only slide");
            return false;
        }
        let Some(index) = self.deck.slide_index(id) else {
            return false;
        };
        self.settle();
        self.deck.slides.remove(index);
        if self.current_slide == id {
            let next = index.min(self.deck.len() - 1);
            self.current_slide = self.deck.slides[next].id.clone();
            self.selection.clear();
        }
        log::info!("Deleted slide {id}");
        self.record("delete slide");
        true
    }

    /// Copy a slide right after the original.
    pub fn duplicate_slide(&mut self, id: &str) -> Option<SlideId> {
        self.settle();
        let copy = self.deck.duplicate_slide(id)?;
        log::info!("Duplicated slide {id} as {copy}");
        self.record("duplicate slide");
        Some(copy)
    }

    /// Move the slide at `from` to position `to`.
    pub fn move_slide(&mut self, from: usize, to: usize) -> bool {
        if !self.deck.move_slide(from, to) {
            log::debug!("Slide move {from} -> {to} is a no-op");
            return false;
        }
        log::info!("Moved slide {from} -> {to}");
        self.record("move slide");
        true
    }

    // --- Selection ---

    /// Select an element on the current slide (with the rest of its group).
    pub fn select(&mut self, id: &str) -> bool {
        let Some(slide) = self.deck.slide(&self.current_slide) else {
            return false;
        };
        if !slide.contains(id) {
            return false;
        }
        self.selection.select_with_group(id.to_string(), slide);
        true
    }

    /// Add or remove an element from the multi-selection.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if !self.current_slide().is_some_and(|s| s.contains(id)) {
            return false;
        }
        self.selection.toggle(id.to_string());
        true
    }

    /// Replace the selection. Ids not on the current slide are dropped.
    pub fn set_selection(&mut self, ids: &[ElementId]) {
        let Some(slide) = self.deck.slide(&self.current_slide) else {
            return;
        };
        self.selection
            .set_selected(ids.iter().filter(|id| slide.contains(id)).cloned());
    }

    pub fn select_all(&mut self) {
        if let Some(slide) = self.deck.slide(&self.current_slide) {
            self.selection.select_all(slide);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Arrangement ---

    fn move_to_targets(&mut self, targets: Vec<(ElementId, Point)>) -> bool {
        let limits = self.config.size_limits();
        let Some(slide) = self.current_slide_mut() else {
            return false;
        };
        let mut changed = false;
        for (id, origin) in targets {
            if let Some(element) = slide.element_mut(&id) {
                let mut geometry = element.geometry;
                geometry.x = origin.x;
                geometry.y = origin.y;
                let geometry = geometry.clamped(limits);
                if geometry != element.geometry {
                    element.geometry = geometry;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Align the selected elements on a shared edge or center.
    pub fn align(&mut self, alignment: Alignment) -> bool {
        self.settle();
        let ids = self.selection.ids();
        let Some(slide) = self.current_slide() else {
            return false;
        };
        let targets = arrange::alignment_targets(slide, &ids, alignment);
        if targets.is_empty() {
            log::debug!("Align needs at least {} elements", arrange::MIN_ALIGN);
            return false;
        }
        let changed = self.move_to_targets(targets);
        if changed {
            self.record("align");
        }
        changed
    }

    /// Space the selected elements evenly along an axis.
    pub fn distribute(&mut self, axis: Axis) -> bool {
        self.settle();
        let ids = self.selection.ids();
        let Some(slide) = self.current_slide() else {
            return false;
        };
        let targets = arrange::distribution_targets(slide, &ids, axis);
        if targets.is_empty() {
            log::debug!("Distribute needs at least {} elements", arrange::MIN_DISTRIBUTE);
            return false;
        }
        let changed = self.move_to_targets(targets);
        if changed {
            self.record("distribute");
        }
        changed
    }

    fn restack_selected(&mut self, direction: Restack) -> bool {
        self.settle();
        let ids = self.selection.ids();
        let Some(slide) = self.current_slide_mut() else {
            return false;
        };
        if !arrange::restack(slide, &ids, direction) {
            log::debug!("Restack {direction:?} left the order unchanged");
            return false;
        }
        self.record("restack");
        true
    }

    /// Move the selected elements above everything else.
    pub fn bring_to_front(&mut self) -> bool {
        self.restack_selected(Restack::ToFront)
    }

    /// Move the selected elements below everything else.
    pub fn send_to_back(&mut self) -> bool {
        self.restack_selected(Restack::ToBack)
    }

    /// Move the selected elements one layer up.
    pub fn bring_forward(&mut self) -> bool {
        self.restack_selected(Restack::Forward)
    }

    /// Move the selected elements one layer down.
    pub fn send_backward(&mut self) -> bool {
        self.restack_selected(Restack::Backward)
    }

    // --- Groups ---

    /// Group the selected elements.
    /// Returns the new group's ID, or None if fewer than 2 elements were selected.
    pub fn group_selected(&mut self) -> Option<GroupId> {
        self.settle();
        let ids = self.selection.ids();
        let slide = self.current_slide_mut()?;
        let Some(group_id) = slide.create_group(&ids) else {
            log::debug!("Group needs at least 2 elements");
            return None;
        };
        log::info!("Grouped {} elements as {group_id}", ids.len());
        self.record("group");
        Some(group_id)
    }

    /// Dissolve the group the selection resolves to.
    /// Returns the former members, which stay selected.
    pub fn ungroup_selected(&mut self) -> Option<Vec<ElementId>> {
        let group_id = self.current_slide().and_then(|slide| self.selection.resolve_group(slide));
        match group_id {
            Some(group_id) => self.ungroup(&group_id),
            None => {
                log::debug!("Selection does not resolve to a group");
                None
            }
        }
    }

    /// Dissolve a group on the current slide.
    pub fn ungroup(&mut self, group_id: &str) -> Option<Vec<ElementId>> {
        self.settle();
        let members = self.current_slide_mut()?.dissolve_group(group_id)?;
        log::info!("Ungrouped {group_id} ({} elements)", members.len());
        self.selection.set_selected(members.iter().cloned());
        self.record("ungroup");
        Some(members)
    }

    // --- Transform sessions ---

    /// Commit a session that is still open.
    fn settle(&mut self) {
        if let Some(outcome) = self.engine.cancel() {
            self.apply_outcome(&outcome);
        }
    }

    /// Write a session outcome back to its element.
    fn apply_outcome(&mut self, outcome: &SessionOutcome) -> bool {
        let Some(element) = self.deck.element_mut(&outcome.element_id) else {
            log::warn!("Session element {} no longer exists", outcome.element_id);
            return false;
        };
        let before = element.clone();
        element.geometry = outcome.geometry;
        if let Some(font_size) = outcome.font_size {
            element.set_text_metrics(font_size, outcome.letter_spacing);
        }
        if *element == before {
            log::debug!("Session on {} ended without changes", outcome.element_id);
            return false;
        }
        self.record("transform");
        true
    }

    /// Start a drag, resize or rotate session on an element of the current
    /// slide. `pointer` is in screen space.
    pub fn begin_session(&mut self, id: &str, handle: HandleKind, pointer: Point) -> bool {
        self.settle();
        let Some(element) = self
            .deck
            .slide(&self.current_slide)
            .and_then(|slide| slide.element(id))
        else {
            log::debug!("Cannot start a session on unknown element {id}");
            return false;
        };
        self.engine.begin(element, handle, pointer);
        true
    }

    /// Feed a pointer move to the active session.
    pub fn update_session(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
        now: Instant,
    ) -> Option<&LiveTransform> {
        self.engine.update(pointer, modifiers, now)
    }

    /// Commit the active session with the final pointer position.
    pub fn end_session(&mut self, pointer: Point, modifiers: Modifiers) -> Option<SessionOutcome> {
        let outcome = self.engine.end(pointer, modifiers)?;
        self.apply_outcome(&outcome);
        Some(outcome)
    }

    /// Commit the active session at the last known pointer position
    /// (window or focus loss).
    pub fn cancel_session(&mut self) -> Option<SessionOutcome> {
        let outcome = self.engine.cancel()?;
        self.apply_outcome(&outcome);
        Some(outcome)
    }

    /// Route a pointer event. Returns true if it changed the selection or a
    /// session.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> bool {
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            PointerEvent::Move {
                position,
                modifiers,
            } => self.update_session(position, modifiers, now).is_some(),
            PointerEvent::Up {
                position,
                modifiers,
            } => self.end_session(position, modifiers).is_some(),
            PointerEvent::Cancel => self.cancel_session().is_some(),
        }
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers) -> bool {
        let mapper = *self.engine.mapper();
        let point = mapper.screen_to_canvas(position);
        let tolerance = mapper.length_to_canvas(self.config.handle_tolerance);
        let Some(slide) = self.deck.slide(&self.current_slide) else {
            return false;
        };

        // Handles of the focused element sit above everything else.
        let grabbed = self
            .selection
            .active()
            .and_then(|id| slide.element(id))
            .and_then(|element| match handle_at(element, point, tolerance)? {
                HandleKind::Body => None,
                kind => Some((element.id.clone(), kind)),
            });
        if let Some((id, kind)) = grabbed {
            return self.begin_session(&id, kind, position);
        }

        match slide.element_at(point, 0.0).map(|e| e.id.clone()) {
            Some(id) if modifiers.shift => {
                self.selection.toggle(id);
                true
            }
            Some(id) => {
                if !self.selection.contains(&id) {
                    self.selection.select_with_group(id.clone(), slide);
                }
                self.begin_session(&id, HandleKind::Body, position)
            }
            None => {
                let had_selection = !self.selection.is_empty();
                self.selection.clear();
                had_selection
            }
        }
    }
}
