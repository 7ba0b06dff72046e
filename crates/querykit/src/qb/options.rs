//! Reusable query options (filter, paging and ordering).

use crate::qb::expr::Expr;
use crate::qb::order::Order;
use crate::value::Value;

/// A mergeable bundle of WHERE / LIMIT / OFFSET / ORDER BY.
///
/// Repositories typically accept an `Option<QueryOptions>` from callers and
/// merge it over their own defaults before applying it to a [`Select`].
///
/// [`Select`]: crate::qb::Select
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    pub filter: Expr,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub order_by: Order,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single row by id: `id=value LIMIT 1`.
    pub fn where_id(value: impl Into<Value>) -> Self {
        Self {
            filter: Expr::id_equals(value),
            limit: Some(1),
            ..Self::default()
        }
    }

    pub fn filter(mut self, filter: Expr) -> Self {
        self.filter = filter;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order_by = order;
        self
    }

    /// Overlay `other` on top of `self`.
    ///
    /// A non-vacuous filter, a non-zero limit or offset, and a non-empty order
    /// in `other` replace the corresponding value here; everything else is kept.
    pub fn merge(mut self, other: Option<&QueryOptions>) -> Self {
        let Some(other) = other else {
            return self;
        };
        if !other.filter.is_empty() {
            self.filter = other.filter.clone();
        }
        if let Some(limit) = other.limit.filter(|n| *n > 0) {
            self.limit = Some(limit);
        }
        if let Some(offset) = other.offset.filter(|n| *n > 0) {
            self.offset = Some(offset);
        }
        if !other.order_by.is_empty() {
            self.order_by = other.order_by.clone();
        }
        self
    }
}
