pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced while composing catalog records into a forest. Everything
/// else in this crate is total by contract: unknown and stale ids are treated
/// as no-ops, never as failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate node id in catalog forest: {id}")]
    DuplicateId { id: String },
}
