//! WHERE-clause predicate collector
//!
//! Per PART_VISIBILITY.md §8: turns a restricted WHERE expression into a
//! disjunction of column→value maps, one map per OR branch. Collection
//! is best-effort pushdown, not evaluation:
//!
//! - An empty result ALWAYS means "no narrowing possible - fetch all".
//!   Returning it is always correct, only less efficient.
//! - IN expands to one branch per value.
//! - AND combines its children's branches as a cartesian product;
//!   branches assigning two values to one column are unsatisfiable and
//!   dropped.
//! - Any unrecognized sub-expression poisons its branch into
//!   "no narrowing".

use std::collections::BTreeMap;

use super::WhereExpr;

/// One OR branch: column → required value.
///
/// BTreeMap for deterministic iteration in logs and tests.
pub type PredicateMap = BTreeMap<String, String>;

/// Collects the OR-disjunction of equality predicates from a WHERE
/// expression.
///
/// The result is a list of alternative column→value requirements; a row
/// may match any one of them. Empty means no narrowing was recognized.
pub fn collect_where_or_clause_predicates(expr: &WhereExpr) -> Vec<PredicateMap> {
    match expr {
        WhereExpr::Eq { column, value } => {
            let mut map = PredicateMap::new();
            map.insert(column.clone(), value.clone());
            vec![map]
        }
        WhereExpr::In { column, values } => values
            .iter()
            .map(|value| {
                let mut map = PredicateMap::new();
                map.insert(column.clone(), value.clone());
                map
            })
            .collect(),
        WhereExpr::And(children) => collect_conjunction(children),
        WhereExpr::Or(children) => collect_disjunction(children),
        WhereExpr::Unsupported => Vec::new(),
    }
}

fn collect_conjunction(children: &[WhereExpr]) -> Vec<PredicateMap> {
    let mut branches: Vec<PredicateMap> = vec![PredicateMap::new()];
    if children.is_empty() {
        return Vec::new();
    }
    for child in children {
        let child_branches = collect_where_or_clause_predicates(child);
        if child_branches.is_empty() {
            // One unrecognized conjunct poisons the whole conjunction.
            return Vec::new();
        }
        let mut merged = Vec::with_capacity(branches.len() * child_branches.len());
        for base in &branches {
            for addition in &child_branches {
                if let Some(combined) = merge_branch(base, addition) {
                    merged.push(combined);
                }
            }
        }
        branches = merged;
    }
    branches
}

fn collect_disjunction(children: &[WhereExpr]) -> Vec<PredicateMap> {
    if children.is_empty() {
        return Vec::new();
    }
    let mut branches = Vec::new();
    for child in children {
        let child_branches = collect_where_or_clause_predicates(child);
        if child_branches.is_empty() {
            // An unrecognized alternative could match anything, so the
            // disjunction cannot narrow at all.
            return Vec::new();
        }
        branches.extend(child_branches);
    }
    branches
}

/// Merges two branches; None when they require different values for the
/// same column (unsatisfiable).
fn merge_branch(base: &PredicateMap, addition: &PredicateMap) -> Option<PredicateMap> {
    let mut combined = base.clone();
    for (column, value) in addition {
        match combined.get(column) {
            Some(existing) if existing != value => return None,
            _ => {
                combined.insert(column.clone(), value.clone());
            }
        }
    }
    Some(combined)
}
