//! Request abstractions
//!
//! A grid request is read-only and built once per inbound call. Order and
//! search entries keep the order in which the caller supplied them.

use serde::Serialize;

/// Search value for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchValue {
    /// Plain term matched against the field
    Term(String),
    /// Sub-property terms combined with OR: (property, term)
    Composite(Vec<(String, String)>),
}

impl SearchValue {
    pub fn term(value: impl Into<String>) -> Self {
        SearchValue::Term(value.into())
    }

    /// True when there is nothing to search for
    pub fn is_blank(&self) -> bool {
        match self {
            SearchValue::Term(term) => term.trim().is_empty(),
            SearchValue::Composite(parts) => parts.iter().all(|(_, v)| v.trim().is_empty()),
        }
    }
}

/// Page window selection. A request exposes exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Explicit number of rows to skip
    Offset(usize),
    /// 1-indexed page number
    Page(usize),
}

impl Pagination {
    /// Number of rows to skip for the given page size.
    ///
    /// Page 1 (and a nonsensical page 0) start at row 0.
    pub fn first_result(self, limit: usize) -> usize {
        match self {
            Pagination::Offset(offset) => offset,
            Pagination::Page(page) => limit.saturating_mul(page.saturating_sub(1)),
        }
    }
}

/// Normalized access to grid request parameters
pub trait GridRequest {
    /// Page size
    fn limit(&self) -> usize;

    /// Offset or page number
    fn pagination(&self) -> Pagination;

    /// (field, direction) pairs in request order
    fn order(&self) -> &[(String, String)];

    /// (field, value) pairs in request order
    fn search(&self) -> &[(String, SearchValue)];

    /// Global search query, if any
    fn global_search(&self) -> Option<&str>;

    /// Direction requested for a field
    fn order_for(&self, name: &str) -> Option<&str> {
        self.order()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, direction)| direction.as_str())
    }

    /// Search value for a field
    fn search_for(&self, name: &str) -> Option<&SearchValue> {
        self.search()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// Insert or replace the entry for `key`, keeping first-insertion position
pub(crate) fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_result_from_offset() {
        assert_eq!(Pagination::Offset(35).first_result(20), 35);
    }

    #[test]
    fn test_first_result_from_page() {
        assert_eq!(Pagination::Page(1).first_result(20), 0);
        assert_eq!(Pagination::Page(3).first_result(20), 40);
        assert_eq!(Pagination::Page(0).first_result(20), 0);
    }

    #[test]
    fn test_first_result_saturates() {
        assert_eq!(Pagination::Page(usize::MAX).first_result(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_blank_search_values() {
        assert!(SearchValue::term("  ").is_blank());
        assert!(!SearchValue::term("acme").is_blank());
        assert!(SearchValue::Composite(vec![("a".into(), "".into())]).is_blank());
        assert!(!SearchValue::Composite(vec![("a".into(), "x".into())]).is_blank());
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut entries = vec![("a".to_string(), 1), ("b".to_string(), 2)];
        upsert(&mut entries, "a".into(), 10);
        upsert(&mut entries, "c".into(), 3);
        assert_eq!(
            entries,
            vec![("a".to_string(), 10), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
    }
}
