use qibo_core::{FilterValue, WherePart};

/// A scalar SQLite can bind.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&FilterValue> for BindValue {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Null => BindValue::Null,
            FilterValue::Bool(b) => BindValue::Int(i64::from(*b)),
            FilterValue::Int(i) => BindValue::Int(*i),
            FilterValue::Float(f) => BindValue::Float(*f),
            FilterValue::String(s) => BindValue::Text(s.clone()),
            // Sequences outside an IN list have no scalar form; bind the JSON text.
            list @ FilterValue::List(_) => {
                BindValue::Text(serde_json::Value::from(list.clone()).to_string())
            }
        }
    }
}

pub struct QueryPart {
    pub clause: String,
    pub values: Vec<BindValue>,
}

/// Rewrite a translated `WHERE` body for SQLite.
///
/// The translator leaves `IN (?)` with the whole sequence as one argument.
/// Each such placeholder becomes one `?` per element, and an empty sequence
/// becomes `NULL` so it matches nothing. Every `?` in the clause is taken as a
/// placeholder, so column names must not contain one.
pub fn expand(part: &WherePart) -> QueryPart {
    let mut clause = String::with_capacity(part.clause.len());
    let mut values = Vec::with_capacity(part.args.len());
    let mut args = part.args.iter();
    let mut prev = None;

    for ch in part.clause.chars() {
        if ch != '?' {
            clause.push(ch);
            prev = Some(ch);
            continue;
        }

        match (prev, args.next()) {
            (Some('('), Some(FilterValue::List(items))) => {
                if items.is_empty() {
                    clause.push_str("NULL");
                } else {
                    clause.push_str(&vec!["?"; items.len()].join(", "));
                    values.extend(items.iter().map(BindValue::from));
                }
            }
            (_, Some(arg)) => {
                clause.push('?');
                values.push(BindValue::from(arg));
            }
            // More placeholders than args; leave it for SQLite to reject.
            (_, None) => clause.push('?'),
        }
        prev = Some(ch);
    }

    QueryPart { clause, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qibo_core::{build_where, Filter};

    #[test]
    fn empty_where_expands_to_nothing() {
        let part = expand(&WherePart::default());
        assert!(part.clause.is_empty());
        assert!(part.values.is_empty());
    }

    #[test]
    fn in_list_expands_to_one_placeholder_per_item() {
        let part = expand(&build_where(&Filter::new().with("id$in", vec![1, 2, 3])));
        assert_eq!(part.clause, "id IN (?, ?, ?)");
        assert_eq!(
            part.values,
            vec![BindValue::Int(1), BindValue::Int(2), BindValue::Int(3)]
        );
    }

    #[test]
    fn empty_required_in_list_matches_nothing() {
        let part = expand(&build_where(&Filter::new().with("id$in!", Vec::<i64>::new())));
        assert_eq!(part.clause, "id IN (NULL)");
        assert!(part.values.is_empty());
    }

    #[test]
    fn scalar_in_value_stays_single() {
        let part = expand(&build_where(&Filter::new().with("id$in", 7)));
        assert_eq!(part.clause, "id IN (?)");
        assert_eq!(part.values, vec![BindValue::Int(7)]);
    }

    #[test]
    fn args_stay_aligned_around_expanded_lists() {
        let filter = Filter::new()
            .with("a", "x")
            .with("b$in", vec!["p", "q"])
            .with("c$gt", 1.5);
        let part = expand(&build_where(&filter));
        assert_eq!(part.clause, "a = ? AND b IN (?, ?) AND c > ?");
        assert_eq!(
            part.values,
            vec![
                BindValue::Text("x".into()),
                BindValue::Text("p".into()),
                BindValue::Text("q".into()),
                BindValue::Float(1.5),
            ]
        );
    }

    #[test]
    fn non_in_lists_and_bools_bind_as_scalars() {
        let filter = Filter::new().with("flag", true).with("tags", vec!["a"]);
        let part = expand(&build_where(&filter));
        assert_eq!(part.clause, "flag = ? AND tags = ?");
        assert_eq!(
            part.values,
            vec![BindValue::Int(1), BindValue::Text(r#"["a"]"#.into())]
        );
    }
}
