use crate::{search, Filter, Query, Record, Searcher};
use serde_json::json;

// ---- Searcher Certification Tests ----
//
// Every test expects `ORDERS_TABLE` to hold exactly the rows from `orders()`.

pub const ORDERS_TABLE: &str = "orders";
pub const ORDERS_COLUMNS: &[&str] = &["id", "name", "status", "amount", "created_at"];

pub fn orders() -> Vec<Record> {
    let items = vec![
        (1, "alpha", 0, 10.0, "2024-01-01 08:00:00"),
        (2, "beta", 1, 20.0, "2024-01-01 23:30:00"),
        (3, "gamma", 1, 30.5, "2024-01-02 00:00:00"),
        (4, "delta", 2, 40.0, "2024-01-03 12:00:00"),
        (5, "alphabet", 0, 55.0, "2024-01-05 09:15:00"),
    ];

    items
        .into_iter()
        .map(|(id, name, status, amount, created_at)| {
            let mut row = Record::new();
            row.insert("id".to_string(), json!(id));
            row.insert("name".to_string(), json!(name));
            row.insert("status".to_string(), json!(status));
            row.insert("amount".to_string(), json!(amount));
            row.insert("created_at".to_string(), json!(created_at));
            row
        })
        .collect()
}

fn ids(rows: &[Record]) -> Vec<i64> {
    rows.iter()
        .map(|r| r.get("id").and_then(|v| v.as_i64()).unwrap())
        .collect()
}

async fn find_ids(searcher: &dyn Searcher, filter: Filter, sort: &str) -> Vec<i64> {
    let query = Query::new(1, 50).with_sort(sort).with_filter(filter);
    ids(&searcher.find_page(ORDERS_TABLE, &query).await.unwrap())
}

pub async fn test_empty_filter_matches_everything(searcher: &dyn Searcher) {
    let query = Query::new(1, 50).with_sort("id");
    assert_eq!(searcher.count(ORDERS_TABLE, &query).await.unwrap(), 5);
    let rows = searcher.find_page(ORDERS_TABLE, &query).await.unwrap();
    assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]);
    assert_eq!(rows[0].get("name").unwrap(), &json!("alpha"));
}

pub async fn test_required_zero_filter_is_applied(searcher: &dyn Searcher) {
    let found = find_ids(searcher, Filter::new().with("status!", 0), "id").await;
    assert_eq!(found, vec![1, 5]);
}

pub async fn test_optional_zero_filter_is_ignored(searcher: &dyn Searcher) {
    let found = find_ids(searcher, Filter::new().with("status", 0), "id").await;
    assert_eq!(found, vec![1, 2, 3, 4, 5]);
}

pub async fn test_like_filter_matches_substring(searcher: &dyn Searcher) {
    let found = find_ids(searcher, Filter::new().with("name$like", "lph"), "id").await;
    assert_eq!(found, vec![1, 5]);
}

pub async fn test_date_range_covers_whole_days(searcher: &dyn Searcher) {
    let filter = Filter::new()
        .with("created_at$gte", "2024-01-01")
        .with("created_at$lte", "2024-01-02");
    let found = find_ids(searcher, filter, "id").await;
    assert_eq!(found, vec![1, 2, 3]);
}

pub async fn test_comparison_operators(searcher: &dyn Searcher) {
    let filter = Filter::new().with("amount$gt", 20.0).with("amount$lt", 50);
    assert_eq!(find_ids(searcher, filter, "id").await, vec![3, 4]);

    let filter = Filter::new().with("status$ne", 1);
    assert_eq!(find_ids(searcher, filter, "id").await, vec![1, 4, 5]);
}

pub async fn test_in_filter_matches_listed_values(searcher: &dyn Searcher) {
    let found = find_ids(searcher, Filter::new().with("id$in", vec![2, 4]), "id").await;
    assert_eq!(found, vec![2, 4]);

    let found = find_ids(
        searcher,
        Filter::new().with("name$in", vec!["beta", "delta", "omega"]),
        "id",
    )
    .await;
    assert_eq!(found, vec![2, 4]);
}

pub async fn test_required_empty_in_matches_nothing(searcher: &dyn Searcher) {
    let query = Query::new(1, 50).with_filter(Filter::new().with("id$in!", Vec::<i64>::new()));
    assert_eq!(searcher.count(ORDERS_TABLE, &query).await.unwrap(), 0);
    assert!(searcher
        .find_page(ORDERS_TABLE, &query)
        .await
        .unwrap()
        .is_empty());
}

pub async fn test_sort_orders_results(searcher: &dyn Searcher) {
    assert_eq!(
        find_ids(searcher, Filter::new(), "-amount").await,
        vec![5, 4, 3, 2, 1]
    );
    assert_eq!(
        find_ids(searcher, Filter::new(), "status,-id").await,
        vec![5, 1, 3, 2, 4]
    );
}

pub async fn test_paging_limits_and_offsets(searcher: &dyn Searcher) {
    let query = Query::new(2, 2).with_sort("id");
    let rows = searcher.find_page(ORDERS_TABLE, &query).await.unwrap();
    assert_eq!(ids(&rows), vec![3, 4]);

    let last = Query::new(3, 2).with_sort("id");
    let rows = searcher.find_page(ORDERS_TABLE, &last).await.unwrap();
    assert_eq!(ids(&rows), vec![5]);
}

pub async fn test_search_reports_pagination(searcher: &dyn Searcher) {
    let query = Query::new(2, 2)
        .with_sort("id")
        .with_filter(Filter::new().with("status$ne", 2));
    let page = search(searcher, ORDERS_TABLE, &query).await.unwrap();
    assert_eq!(page.pagination.total_result, 4);
    assert_eq!(page.pagination.total_page, 2);
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.page_size, 2);
    assert_eq!(ids(&page.data), vec![3, 5]);
}
