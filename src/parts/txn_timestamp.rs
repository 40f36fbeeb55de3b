//! TxnTimestamp - Totally ordered transaction timestamp
//!
//! Per PART_VISIBILITY.md §2:
//! - Assigned by the external timestamp oracle
//! - Totally orders all commits and snapshots
//! - Opaque to visibility resolution; ordering is the only thing that matters
//!
//! This is a PURE TYPE with no behavior beyond construction, access and
//! rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of low bits reserved for the oracle's logical counter.
/// The remaining upper bits are physical milliseconds.
const LOGICAL_BITS: u32 = 18;

/// A totally ordered, opaque transaction timestamp.
///
/// Per PART_VISIBILITY.md §2:
/// - Every committed part carries one
/// - Snapshot reads are defined by comparison against one
/// - No two commits to the same table share the same value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnTimestamp(u64);

impl TxnTimestamp {
    /// The zero timestamp, below every real commit.
    pub const ZERO: TxnTimestamp = TxnTimestamp(0);

    /// Creates a timestamp from its raw oracle value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Creates a timestamp from physical milliseconds with a zero logical
    /// counter. Convenience for tests and snapshot fixtures.
    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis << LOGICAL_BITS)
    }

    /// Returns the raw oracle value.
    ///
    /// This accessor exists for serialization and the system surface.
    /// Resolution code must only compare timestamps, never decode them.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Physical component in whole seconds since the epoch.
    #[inline]
    pub fn to_seconds(&self) -> u64 {
        (self.0 >> LOGICAL_BITS) / 1000
    }

    /// Wall-clock rendering for the system surface.
    ///
    /// Returns None for values outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.to_seconds()).ok()?, 0)
    }
}

impl std::fmt::Display for TxnTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_raw_value() {
        let a = TxnTimestamp::new(10);
        let b = TxnTimestamp::new(20);
        assert!(a < b);
        assert!(b >= a);
    }

    #[test]
    fn test_from_millis_round_trips_to_seconds() {
        let ts = TxnTimestamp::from_millis(42_000);
        assert_eq!(ts.to_seconds(), 42);
    }

    #[test]
    fn test_zero_is_below_everything() {
        assert!(TxnTimestamp::ZERO < TxnTimestamp::new(1));
    }

    #[test]
    fn test_to_datetime_renders_physical_component() {
        // 2021-01-01 00:00:00 UTC in milliseconds
        let ts = TxnTimestamp::from_millis(1_609_459_200_000);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_609_459_200);
    }

    #[test]
    fn test_logical_counter_breaks_ties_within_a_millisecond() {
        let first = TxnTimestamp::new((5 << 18) | 1);
        let second = TxnTimestamp::new((5 << 18) | 2);
        assert!(first < second);
        assert_eq!(first.to_seconds(), second.to_seconds());
    }
}
