//! Criteria structures
//!
//! The built query: page window, sort order, and a
//! conjunction of predicate groups.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Predicate expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Expr {
    /// Partial match: property value contains the term
    Contains { field: String, value: String },
    /// property >= value
    Gte { field: String, value: NaiveDateTime },
    /// property < value
    Lt { field: String, value: NaiveDateTime },
    /// All sub-expressions hold
    And { exprs: Vec<Expr> },
    /// At least one sub-expression holds
    Or { exprs: Vec<Expr> },
}

impl Expr {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Expr::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: NaiveDateTime) -> Self {
        Expr::Gte {
            field: field.into(),
            value,
        }
    }

    pub fn lt(field: impl Into<String>, value: NaiveDateTime) -> Self {
        Expr::Lt {
            field: field.into(),
            value,
        }
    }

    pub fn and(exprs: Vec<Expr>) -> Self {
        Expr::And { exprs }
    }

    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or { exprs }
    }

    /// Returns the operator name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            Expr::Contains { .. } => "contains",
            Expr::Gte { .. } => "gte",
            Expr::Lt { .. } => "lt",
            Expr::And { .. } => "and",
            Expr::Or { .. } => "or",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Contains { field, value } => write!(f, "{} contains {:?}", field, value),
            Expr::Gte { field, value } => write!(f, "{} >= {}", field, value),
            Expr::Lt { field, value } => write!(f, "{} < {}", field, value),
            Expr::And { exprs } | Expr::Or { exprs } => {
                let joiner = if matches!(self, Expr::And { .. }) {
                    " AND "
                } else {
                    " OR "
                };
                f.write_str("(")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(joiner)?;
                    }
                    write!(f, "{}", expr)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc`, case-insensitively
    pub fn parse(direction: &str) -> Option<Self> {
        match direction.trim().to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    /// Property to sort by
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Filter, sort and page window for one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Criteria {
    /// Page size; `None` = unbounded
    pub max_results: Option<usize>,
    /// Rows to skip; `None` = 0
    pub first_result: Option<usize>,
    /// Sort keys, most significant first
    pub orderings: Vec<OrderBy>,
    /// Predicates combined with AND
    pub filters: Vec<Expr>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a predicate into the criteria
    pub fn and_where(&mut self, expr: Expr) {
        self.filters.push(expr);
    }

    /// Same filters and orderings, no page window
    pub fn without_pagination(&self) -> Self {
        Self {
            max_results: None,
            first_result: None,
            orderings: self.orderings.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.max_results.is_some() || self.first_result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("Desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn test_without_pagination() {
        let mut criteria = Criteria {
            max_results: Some(20),
            first_result: Some(40),
            ..Criteria::default()
        };
        criteria.orderings.push(OrderBy::desc("created"));
        criteria.and_where(Expr::contains("name", "acme"));

        let total = criteria.without_pagination();
        assert!(!total.is_paginated());
        assert_eq!(total.filters, criteria.filters);
        assert_eq!(total.orderings, criteria.orderings);
        assert!(criteria.is_paginated());
    }

    #[test]
    fn test_display() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let expr = Expr::or(vec![
            Expr::contains("name", "acme"),
            Expr::and(vec![Expr::gte("created", day), Expr::lt("created", day)]),
        ]);

        assert_eq!(
            expr.to_string(),
            "(name contains \"acme\" OR (created >= 2024-01-05 00:00:00 AND created < 2024-01-05 00:00:00))"
        );
        assert_eq!(expr.op_name(), "or");
    }
}
