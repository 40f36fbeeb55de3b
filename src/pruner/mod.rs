//! Partition Pruning
//!
//! Per PART_VISIBILITY.md §8, pruning narrows the catalog fetch before
//! resolution runs. It reduces work, never correctness: every hint here
//! is optional and "no hint" always degrades to fetching everything.
//!
//! This module provides:
//! - `WhereExpr` - Restricted WHERE AST
//! - `collect_where_or_clause_predicates` - OR-branch predicate maps
//! - `PartitionPruner` - Hint extraction and partition retention

mod ast;
mod collector;

pub use ast::WhereExpr;
pub use collector::{collect_where_or_clause_predicates, PredicateMap};

use crate::parts::DataPart;

/// Hint extraction over collected predicate branches.
///
/// Hints are taken only when exactly one branch survived collection;
/// with several alternatives no single table or partition is implied.
pub struct PartitionPruner;

impl PartitionPruner {
    /// `(database, table)` when one branch pins both.
    pub fn table_filter(branches: &[PredicateMap]) -> Option<(String, String)> {
        let [branch] = branches else {
            return None;
        };
        let database = branch.get("database")?;
        let table = branch.get("table")?;
        Some((database.clone(), table.clone()))
    }

    /// `partition_id` when one branch pins it.
    pub fn partition_filter(branches: &[PredicateMap]) -> Option<String> {
        let [branch] = branches else {
            return None;
        };
        branch.get("partition_id").cloned()
    }

    /// Whether a table survives the collected branches.
    ///
    /// Empty collection means no narrowing, so every table matches. A
    /// branch constrains only the columns it names.
    pub fn branches_match_table(branches: &[PredicateMap], database: &str, table: &str) -> bool {
        if branches.is_empty() {
            return true;
        }
        branches.iter().any(|branch| {
            branch.get("database").map_or(true, |v| v == database)
                && branch.get("table").map_or(true, |v| v == table)
        })
    }

    /// Keeps only parts in the listed partitions.
    pub fn retain_partitions(parts: Vec<DataPart>, partition_ids: &[String]) -> Vec<DataPart> {
        parts
            .into_iter()
            .filter(|part| {
                partition_ids
                    .iter()
                    .any(|id| id == &part.info().partition_id)
            })
            .collect()
    }
}
