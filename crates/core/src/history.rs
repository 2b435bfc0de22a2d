//! Annotation store with linear undo/redo
//!
//! History is a sequence of complete annotation-list snapshots plus a
//! current index. Undo/redo move the index; a fresh commit truncates any
//! redo branch first. Snapshot zero is always the empty list, so the store
//! can always undo back to a blank overlay.

use crate::annotation::Annotation;

/// In-memory annotation list paired with its snapshot history
///
/// Created empty when a document loads, mutated only from the UI thread,
/// and discarded (or `clear`ed) when a new document replaces the current
/// one. All operations are total: out-of-range undo/redo are no-ops.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    live: Vec<Annotation>,
    history: Vec<Vec<Annotation>>,
    index: usize,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            history: vec![Vec::new()],
            index: 0,
        }
    }

    /// Replace the live list and record it as the newest snapshot
    ///
    /// Truncates every snapshot after the current index, so a commit made
    /// after one or more undos discards the redo branch.
    pub fn commit(&mut self, new_list: Vec<Annotation>) {
        self.history.truncate(self.index + 1);
        self.history.push(new_list.clone());
        self.index = self.history.len() - 1;
        self.live = new_list;
        log::debug!(
            "committed snapshot {} ({} annotations)",
            self.index,
            self.live.len()
        );
    }

    /// Step back one snapshot; no-op at the initial state
    ///
    /// Returns true if the live list changed.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.live = self.history[self.index].clone();
        true
    }

    /// Step forward one snapshot; no-op at the newest state
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.history.len() {
            return false;
        }
        self.index += 1;
        self.live = self.history[self.index].clone();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// The current live annotation list, insertion order preserved
    pub fn annotations(&self) -> &[Annotation] {
        &self.live
    }

    /// Lazy view of the live annotations on one page
    ///
    /// Restartable: each call yields a fresh iterator over the current
    /// state. Insertion order is preserved.
    pub fn for_page(&self, page_number: u16) -> impl Iterator<Item = &Annotation> {
        self.live
            .iter()
            .filter(move |a| a.page_number() == page_number)
    }

    /// Reset to the pristine single-empty-snapshot state
    ///
    /// Used when a new document replaces the current one; annotations never
    /// persist across documents.
    pub fn clear(&mut self) {
        self.live.clear();
        self.history.clear();
        self.history.push(Vec::new());
        self.index = 0;
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotation, AnnotationKind, Color};

    fn shape_on_page(page: u16) -> Annotation {
        Annotation::shape(AnnotationKind::Rectangle, (1.0, 1.0), Color::BLUE, page)
    }

    fn committed(store: &AnnotationStore) -> Vec<uuid::Uuid> {
        store.annotations().iter().map(|a| a.id()).collect()
    }

    #[test]
    fn starts_with_single_empty_snapshot() {
        let store = AnnotationStore::new();
        assert!(store.annotations().is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn undo_then_redo_restores_exact_list() {
        let mut store = AnnotationStore::new();
        let a = shape_on_page(1);
        let b = shape_on_page(1);

        store.commit(vec![a.clone()]);
        store.commit(vec![a.clone(), b.clone()]);

        let before = committed(&store);
        assert!(store.undo());
        assert_eq!(store.annotations().len(), 1);
        assert!(store.redo());
        assert_eq!(committed(&store), before);
    }

    #[test]
    fn undo_at_initial_state_is_noop() {
        let mut store = AnnotationStore::new();
        assert!(!store.undo());
        assert!(store.annotations().is_empty());
    }

    #[test]
    fn redo_at_newest_state_is_noop() {
        let mut store = AnnotationStore::new();
        store.commit(vec![shape_on_page(1)]);
        assert!(!store.redo());
        assert_eq!(store.annotations().len(), 1);
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut store = AnnotationStore::new();
        let a = shape_on_page(1);
        let b = shape_on_page(1);
        let c = shape_on_page(1);

        store.commit(vec![a.clone()]);
        store.commit(vec![a.clone(), b]);
        assert!(store.undo());
        store.commit(vec![a, c.clone()]);

        // B's snapshot is unreachable now
        assert!(!store.redo());
        assert_eq!(store.annotations()[1].id(), c.id());
    }

    #[test]
    fn undo_all_the_way_reaches_empty_list() {
        let mut store = AnnotationStore::new();
        store.commit(vec![shape_on_page(1)]);
        store.commit(vec![shape_on_page(1), shape_on_page(1)]);

        assert!(store.undo());
        assert!(store.undo());
        assert!(store.annotations().is_empty());
        assert!(!store.undo());
    }

    #[test]
    fn for_page_filters_and_preserves_order() {
        let mut store = AnnotationStore::new();
        let p1a = shape_on_page(1);
        let p2 = shape_on_page(2);
        let p1b = shape_on_page(1);
        store.commit(vec![p1a.clone(), p2.clone(), p1b.clone()]);

        let page1: Vec<_> = store.for_page(1).map(|a| a.id()).collect();
        assert_eq!(page1, vec![p1a.id(), p1b.id()]);
        assert!(store.for_page(2).all(|a| a.page_number() == 2));
        assert_eq!(store.for_page(3).count(), 0);

        // Restartable: a second pass sees the same view
        let again: Vec<_> = store.for_page(1).map(|a| a.id()).collect();
        assert_eq!(again, page1);
    }

    #[test]
    fn clear_resets_to_pristine_state() {
        let mut store = AnnotationStore::new();
        store.commit(vec![shape_on_page(1)]);
        store.commit(vec![shape_on_page(1), shape_on_page(2)]);

        store.clear();
        assert!(store.annotations().is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }
}
