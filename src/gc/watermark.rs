//! Active-transaction watermark
//!
//! Per PART_GC.md §2:
//! - The deletion floor is the minimum snapshot of any active transaction
//! - It must be fetched immediately before each GC pass
//! - Staleness is safe only in the conservative direction
//!
//! The transaction coordinator behind this seam is an external
//! collaborator; this crate only defines the interface.

use crate::parts::TxnTimestamp;

/// Source of the minimum active snapshot timestamp.
///
/// Implementations query the live transaction coordinator. A cached
/// value may only ever be older than the truth, never newer.
pub trait TxnWatermark {
    /// Minimum snapshot timestamp of any transaction still active.
    fn min_active_snapshot(&self) -> TxnTimestamp;
}

/// Fixed watermark for tests and offline inspection.
#[derive(Debug, Clone, Copy)]
pub struct FixedWatermark(TxnTimestamp);

impl FixedWatermark {
    /// Creates a watermark that always reports the given floor.
    pub fn new(floor: TxnTimestamp) -> Self {
        Self(floor)
    }
}

impl TxnWatermark for FixedWatermark {
    fn min_active_snapshot(&self) -> TxnTimestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_watermark_reports_its_floor() {
        let wm = FixedWatermark::new(TxnTimestamp::new(42));
        assert_eq!(wm.min_active_snapshot(), TxnTimestamp::new(42));
    }
}
