//! VisibilityResolver - latest-committed chain reconstruction
//!
//! Per PART_VISIBILITY.md §3-§5. This is a pure, side-effect-free,
//! single-threaded computation over an immutable fetched snapshot:
//! no locks, no I/O, no shared state. Safe to run concurrently on
//! independent invocations; re-run from scratch every time.
//!
//! Precondition (PART_VISIBILITY.md §2): every input part's commit_time
//! has already been filtered to the snapshot by the catalog fetch, and
//! previous-version chains are materialized in the store. The resolver
//! only resolves logical overlap and ordering.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::parts::{PartId, PartStore, RangeKey};

use super::{ConsistencyError, PartClass, PartState, ResolveResult};

/// The complete outcome of one resolution.
///
/// Every classified part appears in exactly one of the four class sets;
/// `alone_drop_ranges` is an additional view over `drop_ranges`, not a
/// fifth class.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    states: HashMap<PartId, PartState>,
    visible: Vec<PartId>,
    invisible: Vec<PartId>,
    drop_ranges: Vec<PartId>,
    dropped: Vec<PartId>,
    alone_drop_ranges: Vec<PartId>,
}

impl Resolution {
    /// Per-part verdict, if the part was classified.
    pub fn state(&self, id: PartId) -> Option<PartState> {
        self.states.get(&id).copied()
    }

    /// Number of classified parts.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Newest committed data-bearing version per range.
    pub fn visible(&self) -> &[PartId] {
        &self.visible
    }

    /// Superseded versions retained for older snapshots.
    pub fn invisible(&self) -> &[PartId] {
        &self.invisible
    }

    /// Partition-drop tombstones.
    pub fn drop_ranges(&self) -> &[PartId] {
        &self.drop_ranges
    }

    /// Merge tombstones and downgraded drop-range predecessors.
    pub fn dropped(&self) -> &[PartId] {
        &self.dropped
    }

    /// Drop ranges whose partition has no visible part anywhere in the
    /// resolved set (PART_VISIBILITY.md §5): safe for whole-range
    /// reclamation.
    pub fn alone_drop_ranges(&self) -> &[PartId] {
        &self.alone_drop_ranges
    }

    fn classify(&mut self, id: PartId, state: PartState) {
        self.states.insert(id, state);
        match state.class {
            PartClass::VisiblePart => self.visible.push(id),
            PartClass::InvisiblePart => self.invisible.push(id),
            PartClass::DropRange => self.drop_ranges.push(id),
            PartClass::DroppedPart => self.dropped.push(id),
        }
    }
}

/// Stateless resolver per PART_VISIBILITY.md §3-§4.
///
/// Resolution is evaluated identically every time for identical inputs.
pub struct VisibilityResolver;

impl VisibilityResolver {
    /// Classifies every input version and returns the resolution.
    ///
    /// Per PART_VISIBILITY.md §3:
    /// 1. Group versions by logical range key
    /// 2. Order each group by (level, mutation) descending; the maximum
    ///    is the candidate head
    /// 3. Classify the head from its deleted flag and level
    /// 4. Walk the previous-version chain with an explicit cursor,
    ///    assigning ancestor labels (§4)
    ///
    /// Malformed history (ambiguous order, cycles, broken chains) is
    /// fatal per §6.
    pub fn calc_visible_parts(store: &PartStore, input: &[PartId]) -> ResolveResult<Resolution> {
        let mut groups: BTreeMap<RangeKey, Vec<PartId>> = BTreeMap::new();
        for &id in input {
            groups
                .entry(store.get(id).info().range_key())
                .or_default()
                .push(id);
        }

        let mut resolution = Resolution::default();
        let mut partitions_with_visible: HashSet<String> = HashSet::new();
        let mut drop_range_heads: Vec<PartId> = Vec::new();

        for (key, mut group) in groups {
            group.sort_by_key(|id| Reverse(store.get(*id).info().version_order()));
            Self::check_unambiguous(store, &key, &group)?;

            let head = group[0];
            let head_class = Self::walk_chain(store, head, &mut resolution)?;
            Self::check_group_reached(store, &group, &resolution)?;

            match head_class {
                PartClass::VisiblePart => {
                    partitions_with_visible.insert(key.partition_id);
                }
                PartClass::DropRange => drop_range_heads.push(head),
                _ => {}
            }
        }

        for head in drop_range_heads {
            let partition = &store.get(head).info().partition_id;
            if !partitions_with_visible.contains(partition) {
                resolution.alone_drop_ranges.push(head);
            }
        }

        Ok(resolution)
    }

    /// Rejects equal (level, mutation) pairs anywhere in a range group.
    ///
    /// The group is sorted, so collisions are adjacent.
    fn check_unambiguous(
        store: &PartStore,
        key: &RangeKey,
        sorted_group: &[PartId],
    ) -> ResolveResult<()> {
        for pair in sorted_group.windows(2) {
            let a = store.get(pair[0]);
            let b = store.get(pair[1]);
            if a.info().version_order() == b.info().version_order() {
                return Err(ConsistencyError::AmbiguousVersionOrder {
                    partition_id: key.partition_id.clone(),
                    min_block: key.min_block,
                    max_block: key.max_block,
                    first: a.name().to_string(),
                    second: b.name().to_string(),
                    level: a.info().level,
                    mutation: a.info().mutation,
                });
            }
        }
        Ok(())
    }

    /// Walks one chain head-down, labelling every reached part.
    ///
    /// Iterative by requirement: chains are unbounded, so the walk is an
    /// explicit loop with a cursor reassigned to the previous link.
    ///
    /// Label transitions per PART_VISIBILITY.md §4:
    /// - below VisiblePart / DroppedPart / InvisiblePart: InvisiblePart
    /// - below DropRange: DropRange while the ancestor is itself
    ///   MAX_LEVEL, DroppedPart for the first ordinary ancestor
    ///   (the one-level downgrade), InvisiblePart below that
    fn walk_chain(
        store: &PartStore,
        head: PartId,
        resolution: &mut Resolution,
    ) -> ResolveResult<PartClass> {
        let head_part = store.get(head);
        let outdated = head_part.deleted();
        let head_class = if !head_part.deleted() {
            PartClass::VisiblePart
        } else if head_part.info().is_drop_range() {
            PartClass::DropRange
        } else {
            PartClass::DroppedPart
        };
        let mut class = head_class;
        let mut visible = !head_part.deleted();

        let mut walked: HashSet<PartId> = HashSet::new();
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            if !walked.insert(id) {
                return Err(ConsistencyError::CyclicChain {
                    part: store.get(id).name().to_string(),
                });
            }
            let part = store.get(id);
            if !part.info().same_range(head_part.info()) {
                return Err(ConsistencyError::BrokenChain {
                    part: part.name().to_string(),
                    detail: "previous-version link escapes its range group".to_string(),
                });
            }
            if resolution.states.contains_key(&id) {
                return Err(ConsistencyError::BrokenChain {
                    part: part.name().to_string(),
                    detail: "part reachable from more than one chain head".to_string(),
                });
            }

            resolution.classify(
                id,
                PartState {
                    class,
                    visible,
                    outdated,
                },
            );

            let next = store.try_get_previous_part(id);
            if let Some(ancestor) = next {
                class = match class {
                    PartClass::DropRange => {
                        if store.get(ancestor).info().is_drop_range() {
                            PartClass::DropRange
                        } else {
                            PartClass::DroppedPart
                        }
                    }
                    _ => PartClass::InvisiblePart,
                };
            }
            visible = false;
            cursor = next;
        }
        Ok(head_class)
    }

    /// Every group member must have been reached by its head's walk;
    /// anything left over means the materialized chain is broken.
    fn check_group_reached(
        store: &PartStore,
        group: &[PartId],
        resolution: &Resolution,
    ) -> ResolveResult<()> {
        for &id in group {
            if resolution.states.contains_key(&id) {
                continue;
            }
            return Err(ConsistencyError::BrokenChain {
                part: store.get(id).name().to_string(),
                detail: "unreachable from its chain head".to_string(),
            });
        }
        Ok(())
    }
}
