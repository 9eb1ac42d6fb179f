#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Parse a comma-separated sort list. A leading `-` sorts descending.
/// Whitespace around fields is ignored and blank segments are skipped.
pub fn parse_sort(sort: &str) -> Vec<Sort> {
    sort.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix('-') {
            Some(field) => Sort {
                field: field.to_string(),
                direction: SortDirection::Desc,
            },
            None => Sort {
                field: s.to_string(),
                direction: SortDirection::Asc,
            },
        })
        .collect()
}

/// Render an `ORDER BY` body (without the keyword), or `""` for no sort.
pub fn build_order(sort: &str) -> String {
    parse_sort(sort)
        .iter()
        .map(|s| format!("{} {}", s.field, s.direction.sql()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_directions_in_order() {
        assert_eq!(build_order("name,-age"), "name ASC,age DESC");
        assert_eq!(build_order("-created_at"), "created_at DESC");
    }

    #[test]
    fn empty_sort_renders_nothing() {
        assert_eq!(build_order(""), "");
        assert!(parse_sort("").is_empty());
    }

    #[test]
    fn blank_segments_are_skipped() {
        assert_eq!(build_order("name,, -age ,"), "name ASC,age DESC");
    }

    #[test]
    fn parse_exposes_fields() {
        assert_eq!(
            parse_sort("-id"),
            vec![Sort {
                field: "id".to_string(),
                direction: SortDirection::Desc
            }]
        );
    }
}
