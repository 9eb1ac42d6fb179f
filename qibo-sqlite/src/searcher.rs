use crate::query::{expand, BindValue};
use async_trait::async_trait;
use qibo_core::{QiboError, Query, Record, Result, Searcher};
use serde_json::Value;
use sqlx::query::Query as SqlxQuery;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

pub struct SqliteSearcher {
    pool: SqlitePool,
}

impl SqliteSearcher {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await.map_err(storage)?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// `SELECT COUNT(*)` over the filtered table.
    pub fn count_sql(table: &str, query: &Query) -> (String, Vec<BindValue>) {
        let where_part = expand(&query.where_clause());
        let mut sql = format!("SELECT COUNT(*) FROM {table}");
        if !where_part.clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_part.clause);
        }
        (sql, where_part.values)
    }

    /// The page query. A page size of zero or less selects every matching row.
    pub fn select_sql(table: &str, query: &Query) -> (String, Vec<BindValue>) {
        let where_part = expand(&query.where_clause());
        let mut sql = format!("SELECT * FROM {table}");
        if !where_part.clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_part.clause);
        }
        let order = query.order();
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        if query.count > 0 {
            sql.push(' ');
            sql.push_str(&query.limit_offset());
        }
        (sql, where_part.values)
    }

    fn row_to_record(row: &SqliteRow) -> Result<Record> {
        let mut record = Record::new();
        for column in row.columns() {
            let idx = column.ordinal();
            let raw = row.try_get_raw(idx).map_err(storage)?;

            let value = if raw.is_null() {
                Value::Null
            } else {
                let type_name = raw.type_info().name().to_string();
                match type_name.as_str() {
                    "INTEGER" => Value::from(row.try_get::<i64, _>(idx).map_err(storage)?),
                    "REAL" => Value::from(row.try_get::<f64, _>(idx).map_err(storage)?),
                    "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(idx).map_err(storage)?),
                    _ => Value::from(row.try_get::<String, _>(idx).map_err(storage)?),
                }
            };
            record.insert(column.name().to_string(), value);
        }
        Ok(record)
    }
}

fn storage(e: sqlx::Error) -> QiboError {
    QiboError::Storage(e.to_string())
}

fn bind_values<'q>(
    mut q: SqlxQuery<'q, Sqlite, SqliteArguments<'q>>,
    values: &[BindValue],
) -> SqlxQuery<'q, Sqlite, SqliteArguments<'q>> {
    for val in values {
        q = match val {
            BindValue::Null => q.bind(None::<String>),
            BindValue::Int(i) => q.bind(*i),
            BindValue::Float(f) => q.bind(*f),
            BindValue::Text(s) => q.bind(s.clone()),
        };
    }
    q
}

#[async_trait]
impl Searcher for SqliteSearcher {
    async fn count(&self, table: &str, query: &Query) -> Result<i64> {
        let (sql, values) = Self::count_sql(table, query);
        debug!(%sql, binds = values.len(), "SqliteSearcher.count()");

        let row = bind_values(sqlx::query(&sql), &values)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        row.try_get::<i64, _>(0).map_err(storage)
    }

    async fn find_page(&self, table: &str, query: &Query) -> Result<Vec<Record>> {
        let (sql, values) = Self::select_sql(table, query);
        debug!(%sql, binds = values.len(), "SqliteSearcher.find_page()");

        let rows = bind_values(sqlx::query(&sql), &values)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        rows.iter().map(Self::row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qibo_core::Filter;

    #[test]
    fn count_sql_omits_where_without_filters() {
        let (sql, values) = SqliteSearcher::count_sql("orders", &Query::new(1, 10));
        assert_eq!(sql, "SELECT COUNT(*) FROM orders");
        assert!(values.is_empty());
    }

    #[test]
    fn select_sql_combines_all_parts() {
        let query = Query::new(3, 20)
            .with_sort("name,-id")
            .with_filter(Filter::new().with("status!", 0).with("id$in", vec![4, 5]));
        let (sql, values) = SqliteSearcher::select_sql("orders", &query);
        assert_eq!(
            sql,
            "SELECT * FROM orders WHERE id IN (?, ?) AND status = ? \
             ORDER BY name ASC,id DESC LIMIT 20 OFFSET 40"
        );
        assert_eq!(
            values,
            vec![BindValue::Int(4), BindValue::Int(5), BindValue::Int(0)]
        );
    }

    #[test]
    fn select_sql_is_unpaged_for_zero_count() {
        let (sql, _) = SqliteSearcher::select_sql("orders", &Query::new(1, 0));
        assert_eq!(sql, "SELECT * FROM orders");
    }
}
