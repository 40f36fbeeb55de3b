//! Observability
//!
//! Principles:
//! 1. Observability is read-only
//! 2. No side effects on resolution
//! 3. No async or background threads
//! 4. Deterministic output for deterministic input
//!
//! This module provides:
//! - `Event` - Typed observable events
//! - `Logger` / `Severity` - Synchronous structured JSON logging

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
