//! State container for the hosting tree-view screen.
//!
//! The view owns the selected and expanded id sets explicitly and feeds them
//! through the pure reconciliation functions; nothing here is reactive or
//! implicit.

use crate::forest::{Forest, IdSet};
use crate::selection;

#[derive(Debug, Clone, Default)]
pub struct TreeViewState {
    pub selected: IdSet,
    pub expanded: IdSet,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles a raw widget selection event against the stored selection
    /// and stores the result back. Returns the new selection for rendering.
    pub fn apply_selection<I>(&mut self, forest: &Forest, new_ids: I) -> &IdSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let next = selection::determine_ids_to_set(forest, new_ids, self.selected.iter());
        self.selected = next;
        &self.selected
    }

    /// Two-state toggle: expands every node in the forest when nothing is
    /// expanded, collapses everything otherwise. Independent of selection.
    pub fn toggle_expand_all(&mut self, forest: &Forest) {
        if self.expanded.is_empty() {
            self.expanded = forest.node_ids().into_iter().collect();
        } else {
            self.expanded.clear();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.expanded.clear();
    }
}
