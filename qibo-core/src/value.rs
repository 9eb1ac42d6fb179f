use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A filter argument. Decoded requests carry loosely-typed values; this is the
/// closed set the translator knows how to compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// True for the "empty" values an optional filter is dropped for: an empty
    /// list, an empty string, or a numeric zero. `Null` and booleans are never
    /// nil.
    pub fn is_nil(&self) -> bool {
        match self {
            FilterValue::List(items) => items.is_empty(),
            FilterValue::String(s) => s.is_empty(),
            FilterValue::Int(i) => *i == 0,
            FilterValue::Float(f) => *f == 0.0,
            FilterValue::Bool(_) | FilterValue::Null => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// String view used by string-only operators. Anything that is not a
    /// string reads as `""`.
    pub fn as_str_or_empty(&self) -> &str {
        self.as_str().unwrap_or_default()
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FilterValue::Null,
            Value::Bool(b) => FilterValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FilterValue::Int(i),
                None => FilterValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => FilterValue::String(s),
            Value::Array(items) => {
                FilterValue::List(items.into_iter().map(FilterValue::from).collect())
            }
            // No object variant; keep the text so nothing is silently lost.
            obj @ Value::Object(_) => FilterValue::String(obj.to_string()),
        }
    }
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Null => Value::Null,
            FilterValue::Bool(b) => Value::Bool(b),
            FilterValue::Int(i) => Value::from(i),
            FilterValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FilterValue::String(s) => Value::String(s),
            FilterValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        FilterValue::Int(i)
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        FilterValue::Int(i64::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        FilterValue::Float(f)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}
