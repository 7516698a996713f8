//! Product-family hierarchy: parent resolution, sorted linearization, and
//! breadcrumb chains.
//!
//! The backend supplies families as a flat list where each record carries an
//! optional `parent_id`. [`FamilyTree`] resolves those links once per fetch:
//! a `parent_id` with no matching record falls back to a root (the parent may
//! have been deleted), and a parent chain that loops is broken at the point of
//! the loop so every traversal terminates.

use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Typed lookup capability for family records, passed explicitly to rendering
/// code instead of threading an untyped widget API through it.
pub trait FamilyLookup {
    fn family(&self, id: &str) -> Option<&FamilyRecord>;
}

/// A resolved family hierarchy built once from a flat record list.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    records: Vec<FamilyRecord>,
    index: HashMap<String, usize>,

    // Resolved parent links: dangling references dropped, loops broken.
    parent: HashMap<String, String>,

    // Record indices grouped by parent id, and the root indices, both sorted
    // by display name. Built up front so linearization stays linear-plus-sort.
    children: HashMap<String, Vec<usize>>,
    roots: Vec<usize>,
}

impl FamilyTree {
    pub fn new(records: Vec<FamilyRecord>) -> Self {
        let mut kept: Vec<FamilyRecord> = Vec::with_capacity(records.len());
        let mut index: HashMap<String, usize> = HashMap::default();
        for record in records {
            if index.contains_key(record.id.as_str()) {
                tracing::debug!(family = %record.id, "duplicate family id; keeping first record");
                continue;
            }
            index.insert(record.id.clone(), kept.len());
            kept.push(record);
        }

        let mut parent: HashMap<String, String> = HashMap::default();
        for record in &kept {
            let Some(parent_id) = record.parent_id.as_deref() else {
                continue;
            };
            if parent_id == record.id || !index.contains_key(parent_id) {
                tracing::debug!(
                    family = %record.id,
                    parent = %parent_id,
                    "family references a missing parent; treating as root"
                );
                continue;
            }
            parent.insert(record.id.clone(), parent_id.to_string());
        }

        break_parent_loops(&kept, &mut parent);

        let mut children: HashMap<String, Vec<usize>> = HashMap::default();
        let mut roots: Vec<usize> = Vec::new();
        for (i, record) in kept.iter().enumerate() {
            match parent.get(record.id.as_str()) {
                Some(parent_id) => children.entry(parent_id.clone()).or_default().push(i),
                None => roots.push(i),
            }
        }

        roots.sort_by(|&a, &b| name_order(&kept[a].name, &kept[b].name));
        for siblings in children.values_mut() {
            siblings.sort_by(|&a, &b| name_order(&kept[a].name, &kept[b].name));
        }

        Self {
            records: kept,
            index,
            parent,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in their kept input order (duplicates dropped).
    pub fn records(&self) -> &[FamilyRecord] {
        &self.records
    }

    /// Resolved parent of `id`, `None` for roots, dangling references, and
    /// unknown ids.
    pub fn parent(&self, id: &str) -> Option<&FamilyRecord> {
        self.family(self.parent.get(id)?)
    }

    /// Direct children of `id`, sorted by display name.
    pub fn children(&self, id: &str) -> Vec<&FamilyRecord> {
        self.children
            .get(id)
            .map(|v| v.iter().map(|&i| &self.records[i]).collect::<Vec<_>>())
            .unwrap_or_default()
    }

    /// Root records, sorted by display name.
    pub fn roots(&self) -> Vec<&FamilyRecord> {
        self.roots.iter().map(|&i| &self.records[i]).collect()
    }

    /// Depth-first pre-order flattening for flat list rendering: every record
    /// appears exactly once, immediately after its parent chain, with siblings
    /// at each level in ascending name order.
    pub fn linearize(&self) -> Vec<&FamilyRecord> {
        let mut out: Vec<&FamilyRecord> = Vec::with_capacity(self.records.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            let record = &self.records[i];
            out.push(record);
            if let Some(siblings) = self.children.get(record.id.as_str()) {
                for &child in siblings.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Ancestors of `id` ordered root-first, excluding the record itself.
    /// Empty for roots and unknown ids.
    pub fn parent_chain(&self, id: &str) -> Vec<&FamilyRecord> {
        let mut chain: Vec<&FamilyRecord> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::default();
        visited.insert(id);

        let mut current = id;
        while let Some(parent_id) = self.parent.get(current) {
            if !visited.insert(parent_id.as_str()) {
                break;
            }
            if let Some(record) = self.family(parent_id) {
                chain.push(record);
            }
            current = parent_id.as_str();
        }
        chain.reverse();
        chain
    }

    /// Breadcrumb-style label: ancestor names root-first, then the record's
    /// own name, joined with `" / "`. `None` for unknown ids.
    pub fn qualified_name(&self, id: &str) -> Option<String> {
        let record = self.family(id)?;
        let mut parts: Vec<&str> = self
            .parent_chain(id)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        parts.push(record.name.as_str());
        Some(parts.join(" / "))
    }
}

impl FamilyLookup for FamilyTree {
    fn family(&self, id: &str) -> Option<&FamilyRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }
}

/// Demotes the first revisited node of any parent loop to a root so that all
/// chains reach a root. Records already proven to terminate are skipped.
fn break_parent_loops(records: &[FamilyRecord], parent: &mut HashMap<String, String>) {
    let mut safe: HashSet<String> = HashSet::default();

    for record in records {
        if safe.contains(record.id.as_str()) {
            continue;
        }

        let mut path: Vec<String> = Vec::new();
        let mut on_path: HashSet<String> = HashSet::default();
        let mut current = record.id.clone();
        loop {
            if safe.contains(current.as_str()) {
                break;
            }
            if !on_path.insert(current.clone()) {
                tracing::debug!(family = %current, "family parent chain loops; treating as root");
                parent.remove(current.as_str());
                break;
            }
            path.push(current.clone());
            match parent.get(current.as_str()) {
                Some(next) => current = next.clone(),
                None => break,
            }
        }
        for id in path {
            safe.insert(id);
        }
    }
}

/// Sibling ordering: case-insensitive name comparison with a raw tie-break,
/// the deterministic stand-in for a locale-aware compare.
fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
