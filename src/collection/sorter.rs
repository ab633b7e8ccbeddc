//! Multi-key sorting for in-memory collections
//!
//! Sort is stable and deterministic.

use std::cmp::Ordering;

use serde_json::Value;

use crate::access::PropertyAccessor;
use crate::criteria::{OrderBy, SortDirection};

/// Sorts records by criteria orderings
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to the orderings, most significant first.
    ///
    /// Null, missing and unreadable properties are one key that sorts
    /// first; records tied on it keep their input order.
    pub fn sort<'r, T, A>(records: Vec<&'r T>, orderings: &[OrderBy], accessor: &A) -> Vec<&'r T>
    where
        A: PropertyAccessor<T> + ?Sized,
    {
        if orderings.is_empty() {
            return records;
        }

        let mut keyed: Vec<(Vec<Option<Value>>, &'r T)> = records
            .into_iter()
            .map(|record| {
                let keys = orderings
                    .iter()
                    .map(|o| accessor.read(record, &o.field).ok().filter(|v| !v.is_null()))
                    .collect();
                (keys, record)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| Self::compare_keys(a, b, orderings));

        keyed.into_iter().map(|(_, record)| record).collect()
    }

    fn compare_keys(a: &[Option<Value>], b: &[Option<Value>], orderings: &[OrderBy]) -> Ordering {
        for ((a_val, b_val), order) in a.iter().zip(b).zip(orderings) {
            let ordering = Self::compare_values(a_val.as_ref(), b_val.as_ref());
            let ordering = match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - None < null < bool < number < string < array < object
    /// - For same types, natural ordering
    ///
    /// `sort` passes null keys as `None`, so there null and missing tie.
    pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let type_order = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                let a_type = type_order(a_val);
                let b_type = type_order(b_val);

                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                    _ => Ordering::Equal,
                }
            }
        }
    }
}
