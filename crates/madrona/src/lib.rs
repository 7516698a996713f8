//! Product-catalog tree selection and family hierarchy engine.
//!
//! The vendor → product → version "tree view" screen and the product-family
//! classification screen both render flat lists fetched from a REST backend.
//! This crate holds the derived-structure logic behind them: composing the
//! flat records into an indexed forest ([`catalog`]), reconciling raw widget
//! selection events into a consistent selection set ([`selection`], [`view`]),
//! and resolving/ordering the family parent hierarchy ([`family`]).
//!
//! All algorithms are pure and synchronous; callers own the state and rebuild
//! the derived structures from fresh query results on every refresh.

pub use madrona_forest as forest;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod catalog;
pub mod error;
pub mod family;
pub mod selection;
pub mod view;

pub use error::{CatalogError, Result};
pub use forest::{Forest, IdSet, TreeNode};
