//! Catalog Surface
//!
//! The metadata catalog is an external collaborator reached through the
//! narrow `PartCatalog` seam; its storage backend and its retry policy
//! live outside this crate. Everything above the seam - table
//! selection, pruning, resolution, row emission - is here.
//!
//! This module provides:
//! - `TableMeta` / `TableEngine` - Table metadata
//! - `PartCatalog` - Consumed fetch interface
//! - `MemoryCatalog` / `CatalogSnapshot` - In-memory implementation
//! - `SystemPartsRow` - Produced tabular surface
//! - `CatalogQueryAdapter` - WHERE clause in, resolved rows out
//! - `CatalogError` - Configuration vs consistency vs backend faults

mod adapter;
mod errors;
mod memory;
mod system_parts;
mod table_meta;

pub use adapter::CatalogQueryAdapter;
pub use errors::{CatalogError, CatalogResult};
pub use memory::{CatalogSnapshot, MemoryCatalog};
pub use system_parts::{SystemPartsRow, SYSTEM_PARTS_COLUMNS};
pub use table_meta::{TableEngine, TableMeta};

use crate::parts::{DataPart, TxnTimestamp};

/// Consumed catalog fetch interface.
///
/// Implementations must return every version with `commit_time <= at`,
/// superseded ones included, presenting one logically consistent
/// snapshot per call. No size bound is assumed here.
pub trait PartCatalog {
    /// Every table known to the catalog.
    fn list_tables(&self) -> CatalogResult<Vec<TableMeta>>;

    /// One table by name, if it exists.
    fn get_table(&self, database: &str, name: &str) -> CatalogResult<Option<TableMeta>>;

    /// All part versions of a table committed at or before `at`.
    fn get_all_part_versions(
        &self,
        table: &TableMeta,
        at: TxnTimestamp,
    ) -> CatalogResult<Vec<DataPart>>;

    /// Like `get_all_part_versions`, restricted to the given partitions.
    fn get_part_versions_in_partitions(
        &self,
        table: &TableMeta,
        partition_ids: &[String],
        at: TxnTimestamp,
    ) -> CatalogResult<Vec<DataPart>>;
}
