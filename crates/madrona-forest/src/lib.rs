//! Labeled forest container used by `madrona`.
//!
//! A [`Forest`] owns an ordered sequence of root [`TreeNode`]s and builds its
//! id, parent, and children indexes once at construction. All query APIs are
//! total: unknown ids answer `None` or an empty collection, never a panic.

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Deterministic id set: insertion-ordered, Fx-hashed.
pub type IdSet = indexmap::IndexSet<String, FxBuildHasher>;

/// A labeled node with zero or more ordered children. An empty `children`
/// sequence marks a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An indexed forest of [`TreeNode`]s.
///
/// Construction walks the roots in pre-order and records, per node id, its
/// parent id, its child ids, and the child-index path from the root. Ids must
/// be forest-unique by caller convention; if a duplicate slips through, the
/// first occurrence wins and the later subtree is left out of the indexes.
#[derive(Debug, Clone)]
pub struct Forest {
    roots: Vec<TreeNode>,

    parent: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,

    // Pre-order enumeration of every indexed id, and the child-index path that
    // locates the node under `roots` without a fresh search per lookup.
    order: Vec<String>,
    path: HashMap<String, Vec<usize>>,
}

impl Forest {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        let mut forest = Self {
            roots,
            parent: HashMap::default(),
            children: HashMap::default(),
            order: Vec::new(),
            path: HashMap::default(),
        };

        let mut seen: HashSet<String> = HashSet::default();
        for (i, root) in forest.roots.iter().enumerate() {
            index_subtree(
                root,
                None,
                vec![i],
                &mut seen,
                &mut forest.parent,
                &mut forest.children,
                &mut forest.order,
                &mut forest.path,
            );
        }
        forest
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Number of indexed nodes across all roots.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.path.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        let path = self.path.get(id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &step in rest {
            node = node.children.get(step)?;
        }
        Some(node)
    }

    /// Id of the direct parent of `id`, or `None` for roots and unknown ids.
    pub fn parent_id(&self, id: &str) -> Option<&str> {
        self.parent.get(id).map(|s| s.as_str())
    }

    /// Direct parent node of `id`, or `None` for roots and unknown ids.
    pub fn parent_node(&self, id: &str) -> Option<&TreeNode> {
        self.node(self.parent.get(id)?)
    }

    /// Every ancestor id of `id`, nearest parent first. Empty for roots and
    /// unknown ids. The walk carries a visited guard so it terminates even if
    /// the indexes were built from malformed input.
    pub fn ancestor_ids(&self, id: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::default();
        visited.insert(id);

        let mut current = id;
        while let Some(parent) = self.parent.get(current) {
            if !visited.insert(parent.as_str()) {
                break;
            }
            out.push(parent.clone());
            current = parent.as_str();
        }
        out
    }

    /// Child ids of `id`, in tree order.
    pub fn children_ids(&self, id: &str) -> Vec<&str> {
        self.children
            .get(id)
            .map(|v| v.iter().map(|s| s.as_str()).collect::<Vec<_>>())
            .unwrap_or_default()
    }

    /// Every descendant id of `id` (excluding `id` itself), pre-order.
    pub fn descendant_ids(&self, id: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut stack: Vec<&str> = Vec::new();
        if let Some(children) = self.children.get(id) {
            for c in children.iter().rev() {
                stack.push(c);
            }
        }
        while let Some(v) = stack.pop() {
            out.push(v.to_string());
            if let Some(children) = self.children.get(v) {
                for c in children.iter().rev() {
                    stack.push(c);
                }
            }
        }
        out
    }

    /// Every indexed id, pre-order across all roots.
    pub fn node_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Expands a flat id collection to include every descendant of each id
    /// that exists in the forest. Ids absent from the forest pass through
    /// unchanged so stale selections survive an async refresh. Idempotent.
    pub fn expand_with_descendants<I, S>(&self, ids: I) -> IdSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = IdSet::default();
        for id in ids {
            let id = id.as_ref();
            out.insert(id.to_string());
            if self.contains(id) {
                for d in self.descendant_ids(id) {
                    out.insert(d);
                }
            }
        }
        out
    }
}

#[allow(clippy::too_many_arguments)]
fn index_subtree(
    node: &TreeNode,
    parent: Option<&str>,
    path: Vec<usize>,
    seen: &mut HashSet<String>,
    parent_index: &mut HashMap<String, String>,
    children_index: &mut HashMap<String, Vec<String>>,
    order: &mut Vec<String>,
    path_index: &mut HashMap<String, Vec<usize>>,
) {
    if !seen.insert(node.id.clone()) {
        return;
    }
    order.push(node.id.clone());
    path_index.insert(node.id.clone(), path.clone());
    if let Some(parent) = parent {
        parent_index.insert(node.id.clone(), parent.to_string());
        children_index
            .entry(parent.to_string())
            .or_default()
            .push(node.id.clone());
    }
    for (i, child) in node.children.iter().enumerate() {
        let mut child_path = path.clone();
        child_path.push(i);
        index_subtree(
            child,
            Some(&node.id),
            child_path,
            seen,
            parent_index,
            children_index,
            order,
            path_index,
        );
    }
}
