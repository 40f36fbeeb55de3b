//! Visibility Resolution
//!
//! Per PART_VISIBILITY.md §3-§6, this module computes the exact set of
//! parts logically visible at a snapshot from an unordered collection of
//! part versions.
//!
//! This module provides:
//! - `PartClass` / `PartState` - The four-way classification and bits
//! - `VisibilityResolver` - The stateless resolution algorithm
//! - `Resolution` - Disjoint classified sets plus alone drop ranges
//! - `ConsistencyError` - Fatal catalog-corruption faults

mod classification;
mod errors;
mod resolver;

pub use classification::{PartClass, PartState};
pub use errors::{ConsistencyError, ResolveResult};
pub use resolver::{Resolution, VisibilityResolver};
