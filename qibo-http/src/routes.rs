use crate::decode::decode_query;
use axum::{
    extract::{Query as QueryParams, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use qibo_core::{search, ListingConfig, PageDefaults, QiboError, Searcher};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Clone)]
struct ListingState {
    listing: Arc<ListingConfig>,
    defaults: PageDefaults,
    searcher: Arc<dyn Searcher>,
}

/// `GET <listing.path>` answering with `{data, pagination}`.
pub fn build_listing_router(
    listing: ListingConfig,
    defaults: PageDefaults,
    searcher: Arc<dyn Searcher>,
) -> Router {
    let path = listing.path.clone();
    let state = ListingState {
        listing: Arc::new(listing),
        defaults,
        searcher,
    };

    Router::new()
        .route(&path, get(list_handler))
        .with_state(state)
}

async fn list_handler(
    State(state): State<ListingState>,
    QueryParams(params): QueryParams<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let query = decode_query(params, &state.listing, state.defaults)?;
    let page = search(state.searcher.as_ref(), &state.listing.table, &query).await?;
    Ok(Json(page).into_response())
}

/// Maps core errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub QiboError);

impl From<QiboError> for ApiError {
    fn from(e: QiboError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            QiboError::Validation(_) => {
                warn!(error = %self.0, "rejected listing request");
                StatusCode::BAD_REQUEST
            }
            _ => {
                error!(error = %self.0, "listing request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({"error": self.0.to_string()});
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use qibo_core::{Query, Record, Result};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct EchoSearcher;

    #[async_trait::async_trait]
    impl Searcher for EchoSearcher {
        async fn count(&self, _table: &str, _query: &Query) -> Result<i64> {
            Ok(45)
        }

        async fn find_page(&self, table: &str, query: &Query) -> Result<Vec<Record>> {
            let mut row = Record::new();
            row.insert("table".to_string(), json!(table));
            row.insert("where".to_string(), json!(query.where_clause().clause));
            row.insert("order".to_string(), json!(query.order()));
            Ok(vec![row])
        }
    }

    struct FailingSearcher;

    #[async_trait::async_trait]
    impl Searcher for FailingSearcher {
        async fn count(&self, _table: &str, _query: &Query) -> Result<i64> {
            Err(QiboError::Storage("disk on fire".to_string()))
        }

        async fn find_page(&self, _table: &str, _query: &Query) -> Result<Vec<Record>> {
            Ok(vec![])
        }
    }

    fn router(searcher: Arc<dyn Searcher>) -> Router {
        let listing = ListingConfig {
            path: "/orders".to_string(),
            table: "orders".to_string(),
            columns: vec!["id".to_string(), "status".to_string()],
        };
        build_listing_router(listing, PageDefaults::default(), searcher)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn returns_data_and_pagination() {
        let (status, body) =
            get_json(router(Arc::new(EchoSearcher)), "/orders?page=2&status!=0&sort=-id").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"][0],
            json!({"table": "orders", "where": "status = ?", "order": "id DESC"})
        );
        assert_eq!(
            body["pagination"],
            json!({"current_page": 2, "page_size": 20, "total_page": 3, "total_result": 45})
        );
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let (status, body) = get_json(router(Arc::new(EchoSearcher)), "/orders?page=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("page"));

        let (status, _) = get_json(router(Arc::new(EchoSearcher)), "/orders?secret=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_errors_are_server_errors() {
        let (status, body) = get_json(router(Arc::new(FailingSearcher)), "/orders").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("Storage error: disk on fire"));
    }
}
