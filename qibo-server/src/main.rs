use qibo_core::ServerConfig;
use qibo_sqlite::SqliteSearcher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(filter)
        .init();

    let config = ServerConfig::from_env()?;
    if config.listings.is_empty() {
        tracing::warn!("QIBO_LISTINGS is empty, no routes will be served");
    }

    let searcher = SqliteSearcher::new(&config.database_url).await?;
    qibo_server::run(config, Arc::new(searcher)).await
}
