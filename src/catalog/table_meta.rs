//! Table metadata as served by the catalog

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage engine of a catalog table.
///
/// Only `CloudMergeTree` tables have versioned parts; everything else is
/// skipped (or rejected, when named explicitly) by the parts surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEngine {
    /// Part-versioned cloud merge tree.
    CloudMergeTree,
    /// Any other engine, carried by name for error messages.
    Other(String),
}

impl TableEngine {
    /// Engine name for messages and rows.
    pub fn name(&self) -> &str {
        match self {
            TableEngine::CloudMergeTree => "CloudMergeTree",
            TableEngine::Other(name) => name,
        }
    }
}

/// One table as known to the catalog at a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Database the table belongs to.
    pub database: String,
    /// Table name.
    pub name: String,
    /// Stable table identity.
    pub uuid: Uuid,
    /// Storage engine.
    pub engine: TableEngine,
    /// Hash of the table definition, echoed into part rows.
    #[serde(default)]
    pub definition_hash: u64,
}

impl TableMeta {
    /// Creates metadata for a part-versioned table.
    pub fn cloud_merge_tree(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
            uuid: Uuid::new_v4(),
            engine: TableEngine::CloudMergeTree,
            definition_hash: 0,
        }
    }

    /// Creates metadata for a table of a foreign engine.
    pub fn with_engine(
        database: impl Into<String>,
        name: impl Into<String>,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
            uuid: Uuid::new_v4(),
            engine: TableEngine::Other(engine.into()),
            definition_hash: 0,
        }
    }

    /// Returns true if this table has versioned parts.
    pub fn has_parts(&self) -> bool {
        self.engine == TableEngine::CloudMergeTree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_merge_tree_has_parts() {
        let table = TableMeta::cloud_merge_tree("db", "t");
        assert!(table.has_parts());
        assert_eq!(table.engine.name(), "CloudMergeTree");
    }

    #[test]
    fn test_foreign_engine_has_no_parts() {
        let table = TableMeta::with_engine("db", "t", "Memory");
        assert!(!table.has_parts());
        assert_eq!(table.engine.name(), "Memory");
    }
}
