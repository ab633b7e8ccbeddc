//! Predicate evaluation for in-memory collections
//!
//! - `contains`: case-sensitive substring of the value's string form
//! - `gte`/`lt`: the value must parse as a date-time
//! - unreadable properties, nulls, arrays and objects never match

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::access::PropertyAccessor;
use crate::criteria::{parse_datetime, Expr};

/// Evaluates criteria filters against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all filters (AND semantics)
    pub fn matches<T, A>(record: &T, filters: &[Expr], accessor: &A) -> bool
    where
        T: ?Sized,
        A: PropertyAccessor<T> + ?Sized,
    {
        filters
            .iter()
            .all(|expr| Self::matches_expr(record, expr, accessor))
    }

    fn matches_expr<T, A>(record: &T, expr: &Expr, accessor: &A) -> bool
    where
        T: ?Sized,
        A: PropertyAccessor<T> + ?Sized,
    {
        match expr {
            Expr::Contains { field, value } => accessor
                .read(record, field)
                .map_or(false, |actual| Self::contains_match(&actual, value)),
            Expr::Gte { field, value } => Self::read_datetime(record, field, accessor)
                .map_or(false, |actual| actual >= *value),
            Expr::Lt { field, value } => Self::read_datetime(record, field, accessor)
                .map_or(false, |actual| actual < *value),
            Expr::And { exprs } => exprs
                .iter()
                .all(|e| Self::matches_expr(record, e, accessor)),
            Expr::Or { exprs } => exprs
                .iter()
                .any(|e| Self::matches_expr(record, e, accessor)),
        }
    }

    /// Substring match on strings, numbers and booleans
    fn contains_match(actual: &Value, term: &str) -> bool {
        match actual {
            Value::String(s) => s.contains(term),
            Value::Number(n) => n.to_string().contains(term),
            Value::Bool(b) => b.to_string().contains(term),
            _ => false,
        }
    }

    fn read_datetime<T, A>(record: &T, field: &str, accessor: &A) -> Option<NaiveDateTime>
    where
        T: ?Sized,
        A: PropertyAccessor<T> + ?Sized,
    {
        match accessor.read(record, field).ok()? {
            Value::String(s) => parse_datetime(&s),
            // Unix seconds
            Value::Number(n) => n
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.naive_utc()),
            _ => None,
        }
    }
}

impl Expr {
    /// Evaluates this expression against a record
    pub fn matches<T, A>(&self, record: &T, accessor: &A) -> bool
    where
        T: ?Sized,
        A: PropertyAccessor<T> + ?Sized,
    {
        PredicateFilter::matches_expr(record, self, accessor)
    }
}
