//! Garbage Collection Classification
//!
//! Per PART_GC.md:
//! - A part may be reclaimed only when it is outdated AND no active
//!   snapshot can still need it
//! - Classification is pure; deletion belongs to an external executor
//!
//! This module provides:
//! - `TxnWatermark` / `FixedWatermark` - Active-snapshot floor seam
//! - `GcClassifier` - Stateless deletion-candidate filter

mod classifier;
mod watermark;

pub use classifier::GcClassifier;
pub use watermark::{FixedWatermark, TxnWatermark};
