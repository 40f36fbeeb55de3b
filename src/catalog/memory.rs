//! In-memory catalog
//!
//! Test and CLI implementation of `PartCatalog` over a serde-loadable
//! snapshot. It enforces the `commit_time <= snapshot` fetch contract so
//! downstream resolution can rely on its precondition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parts::{DataPart, TxnTimestamp};

use super::{CatalogResult, PartCatalog, TableMeta};

/// Serializable catalog content: tables plus their full part histories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Every table known to the catalog.
    #[serde(default)]
    pub tables: Vec<TableMeta>,
    /// Part version records keyed by `database.table`.
    #[serde(default)]
    pub parts: BTreeMap<String, Vec<DataPart>>,
}

/// In-memory `PartCatalog` over a `CatalogSnapshot`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    snapshot: CatalogSnapshot,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a loaded snapshot.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parses a catalog snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    /// Registers a table.
    pub fn add_table(&mut self, table: TableMeta) {
        self.snapshot.tables.push(table);
    }

    /// Appends a committed part version to a table's history.
    pub fn add_part(&mut self, table: &TableMeta, part: DataPart) {
        self.snapshot
            .parts
            .entry(Self::key(&table.database, &table.name))
            .or_default()
            .push(part);
    }

    fn key(database: &str, name: &str) -> String {
        format!("{database}.{name}")
    }

    fn history(&self, table: &TableMeta) -> &[DataPart] {
        self.snapshot
            .parts
            .get(&Self::key(&table.database, &table.name))
            .map_or(&[], Vec::as_slice)
    }
}

impl PartCatalog for MemoryCatalog {
    fn list_tables(&self) -> CatalogResult<Vec<TableMeta>> {
        Ok(self.snapshot.tables.clone())
    }

    fn get_table(&self, database: &str, name: &str) -> CatalogResult<Option<TableMeta>> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .find(|t| t.database == database && t.name == name)
            .cloned())
    }

    fn get_all_part_versions(
        &self,
        table: &TableMeta,
        at: TxnTimestamp,
    ) -> CatalogResult<Vec<DataPart>> {
        Ok(self
            .history(table)
            .iter()
            .filter(|part| part.commit_time() <= at)
            .cloned()
            .collect())
    }

    fn get_part_versions_in_partitions(
        &self,
        table: &TableMeta,
        partition_ids: &[String],
        at: TxnTimestamp,
    ) -> CatalogResult<Vec<DataPart>> {
        Ok(self
            .history(table)
            .iter()
            .filter(|part| part.commit_time() <= at)
            .filter(|part| {
                partition_ids
                    .iter()
                    .any(|id| id == &part.info().partition_id)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::PartInfo;

    fn catalog_with_history() -> (MemoryCatalog, TableMeta) {
        let table = TableMeta::cloud_merge_tree("db", "events");
        let mut catalog = MemoryCatalog::new();
        catalog.add_table(table.clone());
        catalog.add_part(
            &table,
            DataPart::with_data(PartInfo::new("a", 1, 1, 0, 0), TxnTimestamp::new(10)),
        );
        catalog.add_part(
            &table,
            DataPart::with_data(PartInfo::new("b", 1, 1, 0, 0), TxnTimestamp::new(20)),
        );
        (catalog, table)
    }

    #[test]
    fn test_fetch_filters_by_snapshot() {
        let (catalog, table) = catalog_with_history();
        let parts = catalog
            .get_all_part_versions(&table, TxnTimestamp::new(15))
            .unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].info().partition_id, "a");
    }

    #[test]
    fn test_fetch_is_inclusive_at_the_snapshot() {
        let (catalog, table) = catalog_with_history();
        let parts = catalog
            .get_all_part_versions(&table, TxnTimestamp::new(20))
            .unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_partition_fetch_narrows() {
        let (catalog, table) = catalog_with_history();
        let parts = catalog
            .get_part_versions_in_partitions(&table, &["b".to_string()], TxnTimestamp::new(100))
            .unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].info().partition_id, "b");
    }

    #[test]
    fn test_get_table() {
        let (catalog, _) = catalog_with_history();
        assert!(catalog.get_table("db", "events").unwrap().is_some());
        assert!(catalog.get_table("db", "missing").unwrap().is_none());
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let (catalog, table) = catalog_with_history();
        let json = serde_json::to_string(&catalog.snapshot).unwrap();
        let reloaded = MemoryCatalog::from_json(&json).unwrap();
        let parts = reloaded
            .get_all_part_versions(&table, TxnTimestamp::new(100))
            .unwrap();
        assert_eq!(parts.len(), 2);
    }
}
