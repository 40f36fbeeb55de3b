//! System-surface rows for part versions
//!
//! Per PART_VISIBILITY.md §7: one row per version with identity,
//! statistics, the four commit timestamps, the classification, and the
//! `visible`/`outdated` bits. Timestamps are rendered in whole seconds;
//! raw oracle values stay internal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::TableMeta;
use crate::parts::DataPart;
use crate::visibility::{PartClass, PartState};

/// Column names of the parts surface, in emission order.
pub const SYSTEM_PARTS_COLUMNS: &[&str] = &[
    "database",
    "table",
    "table_uuid",
    "partition",
    "name",
    "bytes_on_disk",
    "rows_count",
    "columns",
    "marks_count",
    "index_granularity",
    "commit_time",
    "kv_commit_time",
    "columns_commit_time",
    "mutation_commit_time",
    "previous_version",
    "partition_id",
    "bucket_number",
    "table_definition_hash",
    "outdated",
    "visible",
    "part_type",
];

/// One row of the parts surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemPartsRow {
    pub database: String,
    pub table: String,
    pub table_uuid: uuid::Uuid,
    /// Serialized partition value. Identical to `partition_id` here;
    /// surfaces with partition expressions render the full value.
    pub partition: String,
    pub name: String,
    pub bytes_on_disk: u64,
    pub rows_count: u64,
    pub columns: String,
    pub marks_count: u64,
    pub index_granularity: Vec<u64>,
    /// Whole seconds, like every *_time column below.
    pub commit_time: u64,
    pub kv_commit_time: u64,
    pub columns_commit_time: u64,
    pub mutation_commit_time: u64,
    /// Mutation hint of the superseded version; 0 for chain tails.
    pub previous_version: u64,
    pub partition_id: String,
    pub bucket_number: i64,
    pub table_definition_hash: u64,
    pub outdated: bool,
    pub visible: bool,
    pub part_type: PartClass,
}

impl SystemPartsRow {
    /// Builds a row from a resolved part.
    ///
    /// `previous_mutation` is the mutation hint of the part this version
    /// supersedes, 0 when the version is a chain tail.
    pub fn from_part(
        table: &TableMeta,
        part: &DataPart,
        state: PartState,
        previous_mutation: u64,
    ) -> Self {
        let stats = part.stats();
        Self {
            database: table.database.clone(),
            table: table.name.clone(),
            table_uuid: table.uuid,
            partition: part.info().partition_id.clone(),
            name: part.name().to_string(),
            bytes_on_disk: stats.bytes_on_disk,
            rows_count: stats.rows_count,
            columns: stats.columns.clone(),
            marks_count: stats.marks_count,
            index_granularity: stats.index_granularity.clone(),
            commit_time: part.commit_time().to_seconds(),
            kv_commit_time: part.kv_commit_time().to_seconds(),
            columns_commit_time: part.columns_commit_time().to_seconds(),
            mutation_commit_time: part.mutation_commit_time().to_seconds(),
            previous_version: previous_mutation,
            partition_id: part.info().partition_id.clone(),
            bucket_number: part.bucket_number(),
            table_definition_hash: part.table_definition_hash(),
            outdated: state.outdated,
            visible: state.visible,
            part_type: state.class,
        }
    }

    /// Alias: `active` reads as `visible`.
    #[inline]
    pub fn active(&self) -> bool {
        self.visible
    }

    /// Alias: `bytes` reads as `bytes_on_disk`.
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes_on_disk
    }

    /// Alias: `rows` reads as `rows_count`.
    #[inline]
    pub fn rows(&self) -> u64 {
        self.rows_count
    }

    /// Wall-clock commit time, for human-facing output.
    pub fn commit_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.commit_time).ok()?, 0)
    }
}
