//! PartStore - Arena of fetched part versions
//!
//! Per PART_VISIBILITY.md §4 and the arena+index note in the design docs:
//! - The store owns every `DataPart` fetched for one resolution
//! - `previous_version` is a non-owning `PartId` side table, never an
//!   embedded reference, because chains are unbounded and parts are
//!   otherwise independently owned
//!
//! This is a data container plus chain materialization. It performs no
//! visibility decisions.

use std::collections::HashMap;

use super::{DataPart, RangeKey};

/// Index of a part inside a `PartStore`.
///
/// Valid only for the store that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PartId(usize);

impl PartId {
    /// Raw index, for diagnostics only.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owning collection of part versions with a previous-version side table.
#[derive(Clone, Debug, Default)]
pub struct PartStore {
    parts: Vec<DataPart>,
    previous: Vec<Option<PartId>>,
}

impl PartStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from fetched parts and materializes chains.
    pub fn from_parts(parts: Vec<DataPart>) -> Self {
        let mut store = Self::new();
        for part in parts {
            store.insert(part);
        }
        store.link_previous_versions();
        store
    }

    /// Inserts a part and returns its id. Links are not touched.
    pub fn insert(&mut self, part: DataPart) -> PartId {
        let id = PartId(self.parts.len());
        self.parts.push(part);
        self.previous.push(None);
        id
    }

    /// Number of parts held.
    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the store holds no parts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the part for an id issued by this store.
    #[inline]
    pub fn get(&self, id: PartId) -> &DataPart {
        &self.parts[id.0]
    }

    /// Iterates over every id in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PartId> {
        (0..self.parts.len()).map(PartId)
    }

    /// Follows the previous-version link, if any.
    ///
    /// Per PART_VISIBILITY.md §4 this is the only traversal primitive;
    /// callers walk chains with an explicit cursor loop.
    #[inline]
    pub fn try_get_previous_part(&self, id: PartId) -> Option<PartId> {
        self.previous[id.0]
    }

    /// Overrides a single previous-version link.
    ///
    /// Used when the catalog supplies explicit predecessor hints, and by
    /// tests fabricating corrupt histories.
    pub fn set_previous(&mut self, id: PartId, previous: Option<PartId>) {
        self.previous[id.0] = previous;
    }

    /// Materializes previous-version chains.
    ///
    /// Versions are joined on their logical range key and linked in
    /// `(level, mutation)` ascending order: each version points at the
    /// next-older one of the same range. Existing links are overwritten.
    ///
    /// Equal `(level, mutation)` pairs are left for the resolver to
    /// reject; linking them in either order would hide the ambiguity.
    pub fn link_previous_versions(&mut self) {
        let mut groups: HashMap<RangeKey, Vec<PartId>> = HashMap::new();
        for id in self.ids() {
            groups
                .entry(self.get(id).info().range_key())
                .or_default()
                .push(id);
        }

        for (_, mut group) in groups {
            group.sort_by_key(|id| self.get(*id).info().version_order());
            let mut older: Option<PartId> = None;
            for id in group {
                self.previous[id.0] = older;
                older = Some(id);
            }
        }
    }
}
