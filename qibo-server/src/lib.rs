use axum::Router;
use qibo_core::{Searcher, ServerConfig};
use qibo_http::build_listing_router;
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the full Axum application from a ServerConfig.
///
/// Every listing shares the one searcher; listing paths must be unique.
pub fn build_app(config: &ServerConfig, searcher: Arc<dyn Searcher>) -> anyhow::Result<Router> {
    let mut seen = HashSet::new();
    let mut app = Router::new();

    for listing in &config.listings {
        if !seen.insert(listing.path.as_str()) {
            anyhow::bail!("duplicate listing path {}", listing.path);
        }
        info!(path = %listing.path, table = %listing.table, "registering listing");
        let router =
            build_listing_router(listing.clone(), config.defaults, Arc::clone(&searcher));
        app = app.merge(router);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(app.layer(cors))
}

/// Start the server on the configured port.
pub async fn run(config: ServerConfig, searcher: Arc<dyn Searcher>) -> anyhow::Result<()> {
    let port = config.port;
    let app = build_app(&config, searcher)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!(port, "qibo listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qibo_core::{Query, Record, Result};

    struct NoRows;

    #[async_trait::async_trait]
    impl Searcher for NoRows {
        async fn count(&self, _table: &str, _query: &Query) -> Result<i64> {
            Ok(0)
        }

        async fn find_page(&self, _table: &str, _query: &Query) -> Result<Vec<Record>> {
            Ok(vec![])
        }
    }

    #[test]
    fn rejects_duplicate_paths() {
        let config = ServerConfig::builder()
            .listing("/orders", "orders", &[])
            .listing("/orders", "archived_orders", &[])
            .build();
        assert!(build_app(&config, Arc::new(NoRows)).is_err());
    }

    #[test]
    fn builds_one_route_per_listing() {
        let config = ServerConfig::builder()
            .listing("/orders", "orders", &[])
            .listing("/users", "users", &["id"])
            .build();
        assert!(build_app(&config, Arc::new(NoRows)).is_ok());
    }
}
