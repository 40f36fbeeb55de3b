//! Part Domain Types
//!
//! Per PART_VISIBILITY.md §1-§2:
//! - Defines the part vocabulary in code
//! - Encodes identity, ordering and immutability structurally
//!
//! This module provides:
//! - `TxnTimestamp` - Totally ordered transaction timestamp
//! - `PartInfo` / `RangeKey` - Part identity and ordering metadata
//! - `DataPart` / `PartStats` - Immutable versioned part record
//! - `PartStore` / `PartId` - Arena with a previous-version side table

mod data_part;
mod part_info;
mod store;
mod txn_timestamp;

pub use data_part::{DataPart, PartStats};
pub use part_info::{PartInfo, RangeKey, MAX_LEVEL};
pub use store::{PartId, PartStore};
pub use txn_timestamp::TxnTimestamp;
