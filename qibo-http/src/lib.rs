pub mod decode;
mod routes;

pub use decode::decode_query;
pub use routes::{build_listing_router, ApiError};
