mod query;
mod searcher;

pub use query::{expand, BindValue, QueryPart};
pub use searcher::SqliteSearcher;
