//! Observable events of the parts surface
//!
//! Events are explicit and typed; free-form event names do not exist.

use std::fmt;

/// Observable events across resolution, pruning and GC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Catalog surface
    /// Table set determined for a surface query.
    TablesSelected,
    /// Part versions fetched for one table.
    PartsFetched,
    /// A non-part table was skipped during a multi-table scan.
    TableSkipped,

    // Resolution
    /// Visibility resolution finished for one table.
    ResolveComplete,
    /// Version-history corruption detected (FATAL for the invocation).
    ConsistencyFault,

    // GC
    /// GC classification pass finished.
    GcPassComplete,
}

impl Event {
    /// Stable event name emitted in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TablesSelected => "TABLES_SELECTED",
            Event::PartsFetched => "PARTS_FETCHED",
            Event::TableSkipped => "TABLE_SKIPPED",
            Event::ResolveComplete => "RESOLVE_COMPLETE",
            Event::ConsistencyFault => "CONSISTENCY_FAULT",
            Event::GcPassComplete => "GC_PASS_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
