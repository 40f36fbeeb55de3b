//! Part classification - the four-way visibility verdict
//!
//! Per PART_VISIBILITY.md §3-§4, every resolved version gets exactly one
//! class, plus two independent bits:
//!
//! | class         | visible | outdated | produced by                      |
//! |---------------|---------|----------|----------------------------------|
//! | VisiblePart   | yes     | no       | INSERT; newest committed version |
//! | InvisiblePart | no      | chain    | superseded, retained for readers |
//! | DropRange     | no      | yes      | DROP PARTITION (MAX_LEVEL)       |
//! | DroppedPart   | no      | yes      | merge tombstone, or the first    |
//! |               |         |          | non-MAX_LEVEL ancestor of a drop |
//! |               |         |          | range                            |
//!
//! `outdated` is chain-level ("chain" above): an InvisiblePart under a
//! deleted head is outdated, under a visible head it is not. That is why
//! the bit is carried explicitly rather than derived from the class.

use serde::Serialize;

/// The four mutually exclusive visibility classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PartClass {
    /// Newest committed data-bearing version of its range.
    VisiblePart,
    /// Superseded version still needed by older snapshots.
    InvisiblePart,
    /// Partition-drop tombstone (level = MAX_LEVEL).
    DropRange,
    /// Merge tombstone, or the downgraded predecessor of a drop range.
    DroppedPart,
}

impl PartClass {
    /// Stable name used by the system surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartClass::VisiblePart => "VisiblePart",
            PartClass::InvisiblePart => "InvisiblePart",
            PartClass::DropRange => "DropRange",
            PartClass::DroppedPart => "DroppedPart",
        }
    }
}

impl std::fmt::Display for PartClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full per-part verdict: class plus the independent bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartState {
    /// The visibility class.
    pub class: PartClass,
    /// True only for a non-deleted chain head.
    pub visible: bool,
    /// True for every member of a chain whose head is deleted.
    pub outdated: bool,
}
