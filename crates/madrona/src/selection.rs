//! Selection reconciliation for the catalog tree view.
//!
//! The tree widget reports its full flat selection on every change event.
//! Diffing that against the previously stored selection tells us whether the
//! user selected or deselected, and [`determine_ids_to_set`] rewrites the
//! selection so the cascade rules hold:
//!
//! - selecting a node selects its whole subtree;
//! - a parent is selected exactly when 100% of its children are selected
//!   (childless nodes are only ever selected directly);
//! - deselecting a node deselects its subtree and strips every ancestor that
//!   no longer has all of its children selected.

use crate::forest::{Forest, IdSet};

/// Computes the selection to store after a raw widget selection event.
///
/// `new_ids` is the widget's full flat selection after the event, `current_ids`
/// the selection stored from the previous event. Ids absent from the forest
/// pass through untouched; the function never fails.
pub fn determine_ids_to_set<N, C>(forest: &Forest, new_ids: N, current_ids: C) -> IdSet
where
    N: IntoIterator,
    N::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let new_ids: IdSet = new_ids
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let current_ids: IdSet = current_ids
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    // Clear-all.
    if new_ids.is_empty() {
        return IdSet::default();
    }

    for id in &new_ids {
        if !forest.contains(id) {
            tracing::trace!(id = %id, "selection id not present in forest; passing through");
        }
    }

    let added: Vec<&str> = new_ids
        .iter()
        .filter(|id| !current_ids.contains(id.as_str()))
        .map(|id| id.as_str())
        .collect();
    let removed: Vec<&str> = current_ids
        .iter()
        .filter(|id| !new_ids.contains(id.as_str()))
        .map(|id| id.as_str())
        .collect();

    // Cascade downward first, then settle parents upward. Removals are applied
    // last so a deselection wins over the re-expansion of ids the widget still
    // reports for the rest of the branch.
    let mut result = forest.expand_with_descendants(new_ids.iter().map(|s| s.as_str()));

    for id in &added {
        select_completed_ancestors(forest, id, &mut result);
    }

    for id in &removed {
        result.shift_remove(*id);
        for descendant in forest.descendant_ids(id) {
            result.shift_remove(descendant.as_str());
        }
        // With `id` unselected, no strict ancestor can keep 100% of its
        // children selected.
        for ancestor in forest.ancestor_ids(id) {
            result.shift_remove(ancestor.as_str());
        }
    }

    result
}

/// Walks upward from `id`, selecting each parent whose children are now all
/// selected, stopping at the first incomplete ancestor.
fn select_completed_ancestors(forest: &Forest, id: &str, selected: &mut IdSet) {
    let mut current = id;
    while let Some(parent) = forest.parent_id(current) {
        let children = forest.children_ids(parent);
        if !children.iter().all(|c| selected.contains(*c)) {
            break;
        }
        selected.insert(parent.to_string());
        current = parent;
    }
}
