pub mod config;
pub mod error;
pub mod filter;
pub mod operator;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod testing;
pub mod value;

pub use config::{ListingConfig, PageDefaults, ServerConfig, ServerConfigBuilder};
pub use error::{QiboError, Result};
pub use filter::{build_where, Condition, Filter, FilterKey, WherePart};
pub use operator::Operator;
pub use pagination::Pagination;
pub use query::Query;
pub use sort::{build_order, parse_sort, Sort, SortDirection};
pub use value::FilterValue;

use serde::{Deserialize, Serialize};

/// One result row, column name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A page of rows with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Record>,
    pub pagination: Pagination,
}

/// Executes translated queries against a store.
#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    /// Number of rows in `table` matching the query's filters.
    async fn count(&self, table: &str, query: &Query) -> Result<i64>;
    /// The rows of the requested page, filtered and sorted.
    async fn find_page(&self, table: &str, query: &Query) -> Result<Vec<Record>>;
}

/// Run the count and page queries and assemble the response page.
pub async fn search(searcher: &dyn Searcher, table: &str, query: &Query) -> Result<Page> {
    let total = searcher.count(table, query).await?;
    let data = searcher.find_page(table, query).await?;

    let mut pagination = Pagination::from_query(query);
    pagination.set_total_page(i32::try_from(total).unwrap_or(i32::MAX));

    Ok(Page { data, pagination })
}
