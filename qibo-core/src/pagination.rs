use crate::query::Query;
use serde::{Deserialize, Serialize};

/// Page metadata returned alongside list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i32,
    pub page_size: i32,
    pub total_page: i32,
    pub total_result: i32,
}

impl Pagination {
    pub fn new(current_page: i32, page_size: i32) -> Self {
        Self {
            current_page,
            page_size,
            ..Self::default()
        }
    }

    pub fn from_query(query: &Query) -> Self {
        Self::new(query.page, query.count)
    }

    /// Derive the page count from a total row count. A non-positive page size
    /// counts as a single page.
    pub fn set_total_page(&mut self, total: i32) -> &mut Self {
        self.total_page = if self.page_size > 0 {
            (f64::from(total) / f64::from(self.page_size)).ceil() as i32
        } else {
            1
        };
        self.total_result = total;
        self
    }
}
