//! stratodb - Part-visibility resolution core for a cloud-native OLAP
//! engine
//!
//! Given a table's complete history of immutable part versions and a
//! transaction snapshot, this crate computes the exact set of parts
//! logically visible to a query or background task, and the deletion
//! candidates a GC pass may hand to its executor. See
//! docs/PART_VISIBILITY.md and docs/PART_GC.md.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod gc;
pub mod observability;
pub mod parts;
pub mod pruner;
pub mod visibility;
