//! Query-string decoding for listing requests.
//!
//! `page`, `count` and `sort` are reserved; every other parameter is a filter
//! entry whose key is passed to the translator untouched. Column and sort
//! names are copied into SQL verbatim, so only plain identifiers get through.

use qibo_core::{
    parse_sort, FilterKey, FilterValue, ListingConfig, Operator, PageDefaults, QiboError, Query,
    Result,
};
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"));

fn check_column(kind: &str, column: &str, listing: &ListingConfig) -> Result<()> {
    if !IDENTIFIER.is_match(column) {
        return Err(QiboError::Validation(format!(
            "invalid {kind} column: {column:?}"
        )));
    }
    if !listing.allows(column) {
        return Err(QiboError::Validation(format!(
            "unknown {kind} column: {column}"
        )));
    }
    Ok(())
}

pub fn decode_query<I>(params: I, listing: &ListingConfig, defaults: PageDefaults) -> Result<Query>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut query = Query::new(1, defaults.count);

    for (key, raw) in params {
        match key.as_str() {
            "page" => query.page = parse_positive("page", &raw)?,
            "count" => query.count = parse_positive("count", &raw)?.min(defaults.max_count),
            "sort" => query.sort = raw,
            _ => {
                let parsed = FilterKey::parse(&key);
                check_column("filter", parsed.column, listing)?;
                let value = infer_value(parsed.operator, &raw);
                query.filter_mut().insert(key, value);
            }
        }
    }

    for field in parse_sort(&query.sort) {
        check_column("sort", &field.field, listing)?;
    }

    Ok(query)
}

fn parse_positive(name: &str, raw: &str) -> Result<i32> {
    let n: i32 = raw
        .trim()
        .parse()
        .map_err(|_| QiboError::Validation(format!("{name} must be an integer, got {raw:?}")))?;
    if n < 1 {
        return Err(QiboError::Validation(format!("{name} must be at least 1")));
    }
    Ok(n)
}

/// Query strings only carry text. `$in` values are comma-separated lists and
/// `$like`, `$gte`, `$lte` keep the raw string, which those operators require.
/// Anything else becomes an integer, a float or stays a string.
fn infer_value(operator: Operator, raw: &str) -> FilterValue {
    match operator {
        Operator::In if raw.is_empty() => FilterValue::List(Vec::new()),
        Operator::In => FilterValue::List(raw.split(',').map(infer_scalar).collect()),
        Operator::Like | Operator::Gte | Operator::Lte => FilterValue::String(raw.to_string()),
        _ => infer_scalar(raw),
    }
}

fn infer_scalar(raw: &str) -> FilterValue {
    if let Ok(i) = raw.parse::<i64>() {
        return FilterValue::Int(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => FilterValue::Float(f),
        _ => FilterValue::String(raw.to_string()),
    }
}
