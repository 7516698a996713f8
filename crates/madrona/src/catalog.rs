//! REST-shaped catalog records and their composition into a forest.
//!
//! The backend hands the UI flat vendor and product lists (versions ride
//! nested inside their product). [`catalog_forest`] nests them into the
//! 3-level vendor → product → version forest, namespacing node ids as
//! `"{vendor}"`, `"{vendor}_{product}"`, `"{vendor}_{product}_{version}"` so
//! every id is forest-unique. The namespacing scheme is part of the public
//! contract: hosting code builds the same ids when it maps a selection back
//! to records.

use crate::error::{CatalogError, Result};
use crate::forest::{Forest, TreeNode};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub vendor_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub versions: Vec<ProductVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVersion {
    pub id: String,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub product_id: String,
    pub is_latest: bool,
    #[serde(default)]
    pub predecessor_id: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
}

pub fn vendor_node_id(vendor_id: &str) -> String {
    vendor_id.to_string()
}

pub fn product_node_id(vendor_id: &str, product_id: &str) -> String {
    format!("{vendor_id}_{product_id}")
}

pub fn version_node_id(vendor_id: &str, product_id: &str, version_id: &str) -> String {
    format!("{vendor_id}_{product_id}_{version_id}")
}

/// Composes vendor and product lists into the tree-view forest.
///
/// Vendors become roots in input order, products attach to their `vendor_id`
/// in input order, versions keep their nested order. A product referencing an
/// unknown vendor is dropped (stale data from an async refresh); a duplicate
/// namespaced id is the one hard error, since forest-unique ids are what every
/// traversal relies on.
pub fn catalog_forest(vendors: &[Vendor], products: &[Product]) -> Result<Forest> {
    let vendor_ids: HashSet<&str> = vendors.iter().map(|v| v.id.as_str()).collect();

    let mut by_vendor: HashMap<&str, Vec<&Product>> = HashMap::default();
    for product in products {
        if !vendor_ids.contains(product.vendor_id.as_str()) {
            tracing::debug!(
                product = %product.id,
                vendor = %product.vendor_id,
                "product references an unknown vendor; dropping from forest"
            );
            continue;
        }
        by_vendor
            .entry(product.vendor_id.as_str())
            .or_default()
            .push(product);
    }

    let mut seen: HashSet<String> = HashSet::default();
    let mut roots: Vec<TreeNode> = Vec::with_capacity(vendors.len());

    for vendor in vendors {
        let vendor_id = vendor_node_id(&vendor.id);
        ensure_unique(&mut seen, &vendor_id)?;

        let mut product_nodes: Vec<TreeNode> = Vec::new();
        for product in by_vendor.get(vendor.id.as_str()).into_iter().flatten() {
            let product_id = product_node_id(&vendor.id, &product.id);
            ensure_unique(&mut seen, &product_id)?;

            let mut version_nodes: Vec<TreeNode> = Vec::with_capacity(product.versions.len());
            for version in &product.versions {
                if version.product_id != product.id {
                    tracing::debug!(
                        version = %version.id,
                        product = %product.id,
                        "nested version carries a foreign product_id; keeping nested placement"
                    );
                }
                let version_id = version_node_id(&vendor.id, &product.id, &version.id);
                ensure_unique(&mut seen, &version_id)?;
                version_nodes.push(TreeNode::new(version_id, version.name.clone()));
            }

            product_nodes.push(TreeNode::with_children(
                product_id,
                product.name.clone(),
                version_nodes,
            ));
        }

        roots.push(TreeNode::with_children(
            vendor_id,
            vendor.name.clone(),
            product_nodes,
        ));
    }

    Ok(Forest::new(roots))
}

fn ensure_unique(seen: &mut HashSet<String>, id: &str) -> Result<()> {
    if !seen.insert(id.to_string()) {
        return Err(CatalogError::DuplicateId { id: id.to_string() });
    }
    Ok(())
}
