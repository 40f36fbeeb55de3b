//! PartInfo - Part identity and ordering metadata
//!
//! Per PART_VISIBILITY.md §1:
//! - A part covers a contiguous block range inside one partition
//! - `(partition_id, min_block, max_block)` is the logical range key
//! - Among versions of the same range, higher `(level, mutation)` is newer
//! - `level == MAX_LEVEL` marks a drop range
//!
//! This is a PURE TYPE with no behavior beyond construction and access.

use serde::{Deserialize, Serialize};

/// Reserved level marking a partition-drop tombstone.
///
/// Per PART_VISIBILITY.md §1, no merge ever produces this level; it is
/// written only by DROP PARTITION.
pub const MAX_LEVEL: u32 = 999_999_999;

/// The logical range a part covers, used to group versions of the same
/// data during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    /// Partition the range belongs to.
    pub partition_id: String,
    /// First covered block number.
    pub min_block: i64,
    /// Last covered block number.
    pub max_block: i64,
}

/// Identity and ordering metadata for one part version.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartInfo {
    /// Partition the part belongs to.
    pub partition_id: String,
    /// First block number covered by this part.
    pub min_block: i64,
    /// Last block number covered by this part.
    pub max_block: i64,
    /// Merge depth. MAX_LEVEL is the drop-range sentinel.
    pub level: u32,
    /// Mutation generation. Hints at the predecessor version.
    #[serde(default)]
    pub mutation: u64,
}

impl PartInfo {
    /// Creates part metadata for the given range and version.
    pub fn new(
        partition_id: impl Into<String>,
        min_block: i64,
        max_block: i64,
        level: u32,
        mutation: u64,
    ) -> Self {
        Self {
            partition_id: partition_id.into(),
            min_block,
            max_block,
            level,
            mutation,
        }
    }

    /// Metadata for a DROP PARTITION tombstone over the given range.
    pub fn drop_range(partition_id: impl Into<String>, min_block: i64, max_block: i64) -> Self {
        Self::new(partition_id, min_block, max_block, MAX_LEVEL, 0)
    }

    /// Returns true if this version is a drop range.
    #[inline]
    pub fn is_drop_range(&self) -> bool {
        self.level == MAX_LEVEL
    }

    /// The logical range key this version belongs to.
    pub fn range_key(&self) -> RangeKey {
        RangeKey {
            partition_id: self.partition_id.clone(),
            min_block: self.min_block,
            max_block: self.max_block,
        }
    }

    /// Version order within a range group: higher is newer.
    #[inline]
    pub fn version_order(&self) -> (u32, u64) {
        (self.level, self.mutation)
    }

    /// Returns true if `self` and `other` cover the same logical range.
    pub fn same_range(&self, other: &PartInfo) -> bool {
        self.partition_id == other.partition_id
            && self.min_block == other.min_block
            && self.max_block == other.max_block
    }

    /// Canonical part name: `partition_min_max_level[_mutation]`.
    pub fn part_name(&self) -> String {
        if self.mutation == 0 {
            format!(
                "{}_{}_{}_{}",
                self.partition_id, self.min_block, self.max_block, self.level
            )
        } else {
            format!(
                "{}_{}_{}_{}_{}",
                self.partition_id, self.min_block, self.max_block, self.level, self.mutation
            )
        }
    }
}
