use crate::operator::Operator;
use crate::value::FilterValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::trace;

static DATE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

const START_OF_DAY: &str = " 00:00:00";
const END_OF_DAY: &str = " 23:59:59";

/// Filter entries keyed by `column[$operator][!]`.
///
/// Entries iterate in key order, which makes the generated clause
/// deterministic. Callers should still compare clauses as sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, FilterValue>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`Filter::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Filter(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A parsed filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterKey<'a> {
    pub column: &'a str,
    pub operator: Operator,
    pub required: bool,
}

impl<'a> FilterKey<'a> {
    /// Parse `column`, `column$op` or `column$op!`. A bare `column!` is a
    /// required equality. Segments after a second `$` are ignored and unknown
    /// operator codes fall back to equality.
    pub fn parse(key: &'a str) -> Self {
        let mut segments = key.split('$');
        let head = segments.next().unwrap_or_default();

        match segments.next() {
            Some(raw) => {
                let (code, required) = strip_required(raw);
                FilterKey {
                    column: head,
                    operator: Operator::resolve(code),
                    required,
                }
            }
            None => {
                let (column, required) = strip_required(head);
                FilterKey {
                    column,
                    operator: Operator::Eq,
                    required,
                }
            }
        }
    }
}

fn strip_required(s: &str) -> (&str, bool) {
    match s.strip_suffix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    }
}

/// One emitted comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub arg: FilterValue,
}

impl Condition {
    /// The SQL fragment for this condition, with a single `?` placeholder.
    pub fn fragment(&self) -> String {
        match self.operator {
            Operator::In => format!("{} IN (?)", self.column),
            op => format!("{} {} ?", self.column, op.sql()),
        }
    }
}

/// A `WHERE` body (without the keyword) and its positional arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WherePart {
    pub clause: String,
    pub args: Vec<FilterValue>,
}

impl WherePart {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }
}

/// Translate one entry into a condition, or `None` when an optional filter
/// carries a nil value.
pub fn condition(key: &str, value: &FilterValue) -> Option<Condition> {
    let parsed = FilterKey::parse(key);
    if !parsed.required && value.is_nil() {
        trace!(key, "dropping optional filter with empty value");
        return None;
    }

    Some(Condition {
        column: parsed.column.to_string(),
        operator: parsed.operator,
        arg: coerce(parsed.operator, value),
    })
}

/// Operator-specific argument shaping. Never fails: string-only operators read
/// non-strings as `""`.
pub fn coerce(operator: Operator, value: &FilterValue) -> FilterValue {
    match operator {
        Operator::Like => FilterValue::String(format!("%{}%", value.as_str_or_empty())),
        Operator::Lte => FilterValue::String(day_bound(value.as_str_or_empty(), END_OF_DAY)),
        Operator::Gte => FilterValue::String(day_bound(value.as_str_or_empty(), START_OF_DAY)),
        _ => value.clone(),
    }
}

fn day_bound(s: &str, time: &str) -> String {
    if DATE_ONLY.is_match(s) {
        format!("{s}{time}")
    } else {
        s.to_string()
    }
}

/// Build the AND-joined `WHERE` body for a filter.
pub fn build_where(filter: &Filter) -> WherePart {
    let mut clauses = Vec::new();
    let mut args = Vec::new();

    for (key, value) in filter.iter() {
        if let Some(cond) = condition(key, value) {
            clauses.push(cond.fragment());
            args.push(cond.arg);
        }
    }

    WherePart {
        clause: clauses.join(" AND "),
        args,
    }
}
