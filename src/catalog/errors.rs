//! Catalog surface errors
//!
//! Three distinct kinds, handled differently by callers:
//! - configuration errors (`MultipleTablesDisabled`, `UnsupportedEngine`,
//!   `TableNotFound`): user-facing, never retried
//! - `Consistency`: catalog corruption surfaced from resolution; fatal,
//!   non-retryable, operator territory
//! - `Backend`: transient fetch failure; the catalog client layer owns
//!   retries, this crate treats it as final for the invocation

use thiserror::Error;

use crate::visibility::ConsistencyError;

/// Result type for catalog-surface operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the catalog query surface.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The query pinned no single table and multi-table scans are off.
    #[error("specify database and table in the where clause or enable multiple-table scans")]
    MultipleTablesDisabled,

    /// An explicitly named table uses an engine without part versioning.
    #[error("the parts surface only supports the CloudMergeTree engine, got `{0}`")]
    UnsupportedEngine(String),

    /// An explicitly named table does not exist at the snapshot.
    #[error("table `{database}`.`{table}` not found")]
    TableNotFound { database: String, table: String },

    /// Version-history corruption detected during resolution.
    #[error("catalog consistency fault: {0}")]
    Consistency(#[from] ConsistencyError),

    /// The catalog backend failed to serve the fetch.
    #[error("catalog backend: {0}")]
    Backend(String),
}
