//! DataPart - Immutable versioned part record
//!
//! Per PART_VISIBILITY.md §1:
//! - A part is immutable once committed; supersession creates new parts
//! - Deletion is an explicit tombstone flag, never removal in place
//! - The catalog owns the canonical records; resolution works on a fetched
//!   copy and never mutates it
//!
//! The predecessor back-reference is NOT stored here. Chains live in the
//! `PartStore` side table (arena + index), because chains are unbounded
//! and parts are otherwise independently owned.

use serde::{Deserialize, Serialize};

use super::{PartInfo, TxnTimestamp};

/// On-disk statistics carried for the system surface.
///
/// Drop ranges carry no data, so every field defaults to empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartStats {
    /// Compressed bytes on object storage.
    #[serde(default)]
    pub bytes_on_disk: u64,
    /// Row count.
    #[serde(default)]
    pub rows_count: u64,
    /// Serialized column list.
    #[serde(default)]
    pub columns: String,
    /// Mark count.
    #[serde(default)]
    pub marks_count: u64,
    /// Rows per granule.
    #[serde(default)]
    pub index_granularity: Vec<u64>,
}

/// One immutable version of a part.
///
/// All fields are private to enforce immutability; construction goes
/// through `with_data` / `with_tombstone` plus `with_*` builders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPart {
    /// Canonical part name, derived from the info at construction.
    name: String,
    /// Identity and ordering metadata.
    info: PartInfo,
    /// Transaction timestamp at which the part became durable.
    commit_time: TxnTimestamp,
    /// Timestamp recorded by the metadata store itself.
    kv_commit_time: TxnTimestamp,
    /// Timestamp of the last column-schema commit affecting this part.
    columns_commit_time: TxnTimestamp,
    /// Timestamp of the mutation that produced this version, if any.
    mutation_commit_time: TxnTimestamp,
    /// Tombstone flag. True for merge tombstones and drop ranges.
    deleted: bool,
    /// Bucket assignment for clustered tables; -1 when unbucketed.
    #[serde(default = "default_bucket")]
    bucket_number: i64,
    /// Hash of the table definition the part was written under.
    #[serde(default)]
    table_definition_hash: u64,
    /// On-disk statistics.
    #[serde(default)]
    stats: PartStats,
}

fn default_bucket() -> i64 {
    -1
}

impl DataPart {
    /// Creates a committed data-bearing part.
    pub fn with_data(info: PartInfo, commit_time: TxnTimestamp) -> Self {
        Self::build(info, commit_time, false)
    }

    /// Creates a committed tombstone (merge tombstone or drop range,
    /// depending on the info's level).
    pub fn with_tombstone(info: PartInfo, commit_time: TxnTimestamp) -> Self {
        Self::build(info, commit_time, true)
    }

    fn build(info: PartInfo, commit_time: TxnTimestamp, deleted: bool) -> Self {
        Self {
            name: info.part_name(),
            info,
            commit_time,
            kv_commit_time: commit_time,
            columns_commit_time: commit_time,
            mutation_commit_time: TxnTimestamp::ZERO,
            deleted,
            bucket_number: -1,
            table_definition_hash: 0,
            stats: PartStats::default(),
        }
    }

    /// Attaches on-disk statistics.
    pub fn with_stats(mut self, stats: PartStats) -> Self {
        self.stats = stats;
        self
    }

    /// Records the mutation commit that produced this version.
    pub fn with_mutation_commit_time(mut self, ts: TxnTimestamp) -> Self {
        self.mutation_commit_time = ts;
        self
    }

    /// Records the column-schema commit this part was written under.
    pub fn with_columns_commit_time(mut self, ts: TxnTimestamp) -> Self {
        self.columns_commit_time = ts;
        self
    }

    /// Assigns a bucket number.
    pub fn with_bucket_number(mut self, bucket: i64) -> Self {
        self.bucket_number = bucket;
        self
    }

    /// Records the table-definition hash.
    pub fn with_table_definition_hash(mut self, hash: u64) -> Self {
        self.table_definition_hash = hash;
        self
    }

    /// Canonical part name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity and ordering metadata.
    #[inline]
    pub fn info(&self) -> &PartInfo {
        &self.info
    }

    /// Commit timestamp.
    #[inline]
    pub fn commit_time(&self) -> TxnTimestamp {
        self.commit_time
    }

    /// Metadata-store commit timestamp.
    #[inline]
    pub fn kv_commit_time(&self) -> TxnTimestamp {
        self.kv_commit_time
    }

    /// Column-schema commit timestamp.
    #[inline]
    pub fn columns_commit_time(&self) -> TxnTimestamp {
        self.columns_commit_time
    }

    /// Mutation commit timestamp; ZERO when the version is not a
    /// mutation product.
    #[inline]
    pub fn mutation_commit_time(&self) -> TxnTimestamp {
        self.mutation_commit_time
    }

    /// Tombstone flag.
    #[inline]
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Bucket assignment; -1 when unbucketed.
    #[inline]
    pub fn bucket_number(&self) -> i64 {
        self.bucket_number
    }

    /// Table-definition hash.
    #[inline]
    pub fn table_definition_hash(&self) -> u64 {
        self.table_definition_hash
    }

    /// On-disk statistics.
    #[inline]
    pub fn stats(&self) -> &PartStats {
        &self.stats
    }
}
