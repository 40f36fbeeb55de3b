//! GC classification - deletion-candidate selection
//!
//! Per PART_GC.md §3-§4, classification is a pure filter over an
//! immutable resolution. It deletes nothing; the candidate set goes to
//! an external deletion executor.

use crate::parts::{PartId, PartStore, TxnTimestamp};
use crate::visibility::Resolution;

use super::TxnWatermark;

/// Stateless eligibility checker per PART_GC.md §3.
///
/// Both rules are mandatory:
/// 1. the part is outdated (its chain head is deleted)
/// 2. no active snapshot precedes its commit
pub struct GcClassifier;

impl GcClassifier {
    /// Returns parts eligible for physical deletion under the given
    /// floor.
    ///
    /// The boundary is inclusive: a part committed exactly at the
    /// minimum active snapshot is eligible (PART_GC.md §3).
    pub fn deletion_candidates(
        store: &PartStore,
        resolution: &Resolution,
        min_active: TxnTimestamp,
    ) -> Vec<PartId> {
        store
            .ids()
            .filter(|id| {
                resolution
                    .state(*id)
                    .map_or(false, |state| state.outdated)
                    && store.get(*id).commit_time() <= min_active
            })
            .collect()
    }

    /// Runs one classification pass, fetching the watermark inside the
    /// pass as PART_GC.md §2 requires.
    pub fn run_pass<W: TxnWatermark>(
        store: &PartStore,
        resolution: &Resolution,
        watermark: &W,
    ) -> Vec<PartId> {
        let floor = watermark.min_active_snapshot();
        Self::deletion_candidates(store, resolution, floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gc::FixedWatermark;
    use crate::parts::{DataPart, PartInfo};
    use crate::visibility::VisibilityResolver;

    fn store_with_tombstoned_chain(commit: u64) -> PartStore {
        PartStore::from_parts(vec![
            DataPart::with_data(PartInfo::new("p", 1, 1, 0, 0), TxnTimestamp::new(commit)),
            DataPart::with_tombstone(PartInfo::new("p", 1, 1, 1, 0), TxnTimestamp::new(commit)),
        ])
    }

    fn resolve(store: &PartStore) -> Resolution {
        let ids: Vec<PartId> = store.ids().collect();
        VisibilityResolver::calc_visible_parts(store, &ids).unwrap()
    }

    #[test]
    fn test_outdated_part_behind_floor_is_candidate() {
        let store = store_with_tombstoned_chain(50);
        let res = resolve(&store);

        let candidates = GcClassifier::deletion_candidates(&store, &res, TxnTimestamp::new(100));
        // Tombstone head and its condemned ancestor.
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_active_reader_blocks_deletion() {
        let store = store_with_tombstoned_chain(50);
        let res = resolve(&store);

        let candidates = GcClassifier::deletion_candidates(&store, &res, TxnTimestamp::new(49));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_floor_boundary_is_inclusive() {
        let store = store_with_tombstoned_chain(50);
        let res = resolve(&store);

        let candidates = GcClassifier::deletion_candidates(&store, &res, TxnTimestamp::new(50));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_visible_chain_is_never_a_candidate() {
        let store = PartStore::from_parts(vec![
            DataPart::with_data(PartInfo::new("p", 1, 1, 0, 0), TxnTimestamp::new(10)),
            DataPart::with_data(PartInfo::new("p", 1, 1, 1, 0), TxnTimestamp::new(20)),
        ]);
        let res = resolve(&store);

        // Even far behind the floor, a visible head and its retained
        // ancestors stay out of GC's reach.
        let candidates = GcClassifier::deletion_candidates(&store, &res, TxnTimestamp::new(1000));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_run_pass_uses_the_watermark() {
        let store = store_with_tombstoned_chain(50);
        let res = resolve(&store);

        let blocked = GcClassifier::run_pass(&store, &res, &FixedWatermark::new(TxnTimestamp::new(10)));
        assert!(blocked.is_empty());

        let cleared = GcClassifier::run_pass(&store, &res, &FixedWatermark::new(TxnTimestamp::new(99)));
        assert_eq!(cleared.len(), 2);
    }
}
