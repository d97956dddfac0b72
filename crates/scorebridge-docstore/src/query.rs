//! Collection query description.
//!
//! Queries are deliberately small: equality and array-membership
//! predicates combined with AND, one optional ordering, one optional
//! limit. That is the entire access pattern the services need, and it
//! keeps both backends honest about supporting the same semantics.

use serde_json::Value;

/// A single predicate over a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `data[field] == value`.
    Eq { field: String, value: Value },
    /// `data[field]` is an array containing `value`.
    ArrayContains { field: String, value: Value },
}

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A query over one collection. Built with the fluent methods below.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, SortDirection)>,
    pub limit: Option<i64>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality predicate.
    #[must_use]
    pub fn filter_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value,
        });
        self
    }

    /// Adds an array-membership predicate.
    #[must_use]
    pub fn filter_array_contains(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.push(Filter::ArrayContains {
            field: field.into(),
            value,
        });
        self
    }

    /// Orders results by a top-level field.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    /// Caps the number of returned documents.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
