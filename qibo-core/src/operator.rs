use serde::{Deserialize, Serialize};

/// Comparison operators a filter key may name after its `$` separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Gt,
    Lt,
    #[default]
    Eq,
    Ne,
    Gte,
    Lte,
    Like,
    In,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
        Operator::Ne,
        Operator::Gte,
        Operator::Lte,
        Operator::Like,
        Operator::In,
    ];

    /// The short code used in filter keys (`amount$gte`).
    pub fn code(self) -> &'static str {
        match self {
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::In => "in",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
        }
    }

    /// Case-insensitive lookup of an operator code.
    pub fn from_code(code: &str) -> Option<Operator> {
        Self::ALL
            .into_iter()
            .find(|op| op.code().eq_ignore_ascii_case(code))
    }

    /// Like [`Operator::from_code`], falling back to `Eq` for unknown codes.
    pub fn resolve(code: &str) -> Operator {
        Self::from_code(code).unwrap_or(Operator::Eq)
    }
}
