use crate::filter::{build_where, Filter, WherePart};
use crate::sort::build_order;
use serde::{Deserialize, Serialize};

/// A list request: 1-based page, page size, sort list and filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub page: i32,
    pub count: i32,
    pub sort: String,
    pub filter: Filter,
}

impl Query {
    pub fn new(page: i32, count: i32) -> Self {
        Self {
            page,
            count,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    /// `WHERE` body and positional args. Empty filters give an empty clause.
    pub fn where_clause(&self) -> WherePart {
        build_where(&self.filter)
    }

    /// `ORDER BY` body, or `""` when no sort was requested.
    pub fn order(&self) -> String {
        build_order(&self.sort)
    }

    pub fn limit(&self) -> i32 {
        self.count
    }

    /// Rows to skip. Not clamped: page 0 or a negative count yield negative
    /// offsets.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.count)
    }

    pub fn limit_offset(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit(), self.offset())
    }
}
