//! Visibility consistency errors
//!
//! Per PART_VISIBILITY.md §6, malformed version history is catalog
//! corruption. The resolver never repairs it and the caller must never
//! retry; these faults require operator intervention.

use thiserror::Error;

/// Result type for visibility resolution.
pub type ResolveResult<T> = Result<T, ConsistencyError>;

/// Fatal, non-retryable version-history faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    /// Two versions of one range share the same (level, mutation); there
    /// is no defined order between them and picking one silently would
    /// make resolution input-order dependent.
    #[error("ambiguous version order in range {partition_id}_{min_block}_{max_block}: parts `{first}` and `{second}` share level {level}, mutation {mutation}")]
    AmbiguousVersionOrder {
        partition_id: String,
        min_block: i64,
        max_block: i64,
        first: String,
        second: String,
        level: u32,
        mutation: u64,
    },

    /// A previous-version walk revisited a part.
    #[error("cycle in previous-version chain at part `{part}`")]
    CyclicChain { part: String },

    /// A chain is inconsistent with its range group: either a group
    /// member is unreachable from the group head, or a link escapes into
    /// another group's territory.
    #[error("broken previous-version chain at part `{part}`: {detail}")]
    BrokenChain { part: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_order_names_both_parts() {
        let err = ConsistencyError::AmbiguousVersionOrder {
            partition_id: "202401".to_string(),
            min_block: 1,
            max_block: 1,
            first: "202401_1_1_1_5".to_string(),
            second: "202401_1_1_1_5".to_string(),
            level: 1,
            mutation: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("202401_1_1"));
        assert!(msg.contains("level 1"));
        assert!(msg.contains("mutation 5"));
    }

    #[test]
    fn test_cycle_error_names_the_part() {
        let err = ConsistencyError::CyclicChain {
            part: "p_1_1_0".to_string(),
        };
        assert!(err.to_string().contains("p_1_1_0"));
    }
}
