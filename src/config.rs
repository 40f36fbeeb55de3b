//! System-surface configuration
//!
//! Small, serde-loaded, defaults-first. Unknown behavior is opt-in:
//! scanning every table in the catalog from one query is gated behind a
//! flag, the way the original surface gates it behind a session setting.

use serde::{Deserialize, Serialize};

/// Configuration for the parts system surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPartsConfig {
    /// Allow queries that do not pin a single (database, table) pair to
    /// scan every table in the catalog. Off by default: an unpinned
    /// query over a large catalog is usually a mistake.
    pub enable_multiple_tables: bool,
}

impl Default for SystemPartsConfig {
    fn default() -> Self {
        Self {
            enable_multiple_tables: false,
        }
    }
}

impl SystemPartsConfig {
    /// Config with multi-table scans enabled.
    pub fn with_multiple_tables() -> Self {
        Self {
            enable_multiple_tables: true,
        }
    }
}
