//! Restricted WHERE-clause AST for system-surface pushdown
//!
//! Per PART_VISIBILITY.md §8, only equality and IN predicates over the
//! surface's filter columns are recognized. Everything else is carried
//! as `Unsupported`, which makes the whole branch fall back to
//! "no narrowing".

/// A WHERE expression restricted to the recognized shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereExpr {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column IN (values...)`
    In { column: String, values: Vec<String> },
    /// Conjunction of sub-expressions.
    And(Vec<WhereExpr>),
    /// Disjunction of sub-expressions.
    Or(Vec<WhereExpr>),
    /// Anything the collector does not understand.
    Unsupported,
}

impl WhereExpr {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        WhereExpr::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// `column IN (values...)`
    pub fn in_list<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        WhereExpr::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction.
    pub fn and(children: Vec<WhereExpr>) -> Self {
        WhereExpr::And(children)
    }

    /// Disjunction.
    pub fn or(children: Vec<WhereExpr>) -> Self {
        WhereExpr::Or(children)
    }
}
