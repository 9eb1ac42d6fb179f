use qibo_core::testing as cert;
use qibo_sqlite::SqliteSearcher;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

async fn create_searcher() -> SqliteSearcher {
    // One connection so every query sees the same in-memory DB
    let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            status INTEGER NOT NULL,
            amount REAL NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    for row in cert::orders() {
        sqlx::query(
            "INSERT INTO orders (id, name, status, amount, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(row["id"].as_i64())
        .bind(row["name"].as_str().map(String::from))
        .bind(row["status"].as_i64())
        .bind(row["amount"].as_f64())
        .bind(row["created_at"].as_str().map(String::from))
        .execute(&pool)
        .await
        .unwrap();
    }

    SqliteSearcher::new_with_pool(pool)
}

#[tokio::test]
async fn should_match_everything_without_filters() {
    let searcher = create_searcher().await;
    cert::test_empty_filter_matches_everything(&searcher).await;
}

#[tokio::test]
async fn should_apply_required_zero_filter() {
    let searcher = create_searcher().await;
    cert::test_required_zero_filter_is_applied(&searcher).await;
}

#[tokio::test]
async fn should_ignore_optional_zero_filter() {
    let searcher = create_searcher().await;
    cert::test_optional_zero_filter_is_ignored(&searcher).await;
}

#[tokio::test]
async fn should_match_like_substring() {
    let searcher = create_searcher().await;
    cert::test_like_filter_matches_substring(&searcher).await;
}

#[tokio::test]
async fn should_cover_whole_days_in_date_range() {
    let searcher = create_searcher().await;
    cert::test_date_range_covers_whole_days(&searcher).await;
}

#[tokio::test]
async fn should_apply_comparison_operators() {
    let searcher = create_searcher().await;
    cert::test_comparison_operators(&searcher).await;
}

#[tokio::test]
async fn should_expand_in_lists() {
    let searcher = create_searcher().await;
    cert::test_in_filter_matches_listed_values(&searcher).await;
}

#[tokio::test]
async fn should_match_nothing_for_required_empty_in() {
    let searcher = create_searcher().await;
    cert::test_required_empty_in_matches_nothing(&searcher).await;
}

#[tokio::test]
async fn should_sort_results() {
    let searcher = create_searcher().await;
    cert::test_sort_orders_results(&searcher).await;
}

#[tokio::test]
async fn should_limit_and_offset() {
    let searcher = create_searcher().await;
    cert::test_paging_limits_and_offsets(&searcher).await;
}

#[tokio::test]
async fn should_report_pagination() {
    let searcher = create_searcher().await;
    cert::test_search_reports_pagination(&searcher).await;
}
