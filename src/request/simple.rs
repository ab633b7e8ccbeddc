//! Offset-based request built in code

use crate::config::DEFAULT_LIMIT;

use super::types::{upsert, GridRequest, Pagination, SearchValue};

/// Request assembled programmatically; paginates by offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRequest {
    limit: usize,
    offset: usize,
    order: Vec<(String, String)>,
    search: Vec<(String, SearchValue)>,
    global_search: Option<String>,
}

impl Default for SimpleRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: Vec::new(),
            search: Vec::new(),
            global_search: None,
        }
    }
}

impl SimpleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Order by a field; directions are lower-cased
    pub fn order_by(mut self, field: impl Into<String>, direction: &str) -> Self {
        upsert(&mut self.order, field.into(), direction.to_lowercase());
        self
    }

    pub fn search(mut self, field: impl Into<String>, term: impl Into<String>) -> Self {
        upsert(&mut self.search, field.into(), SearchValue::Term(term.into()));
        self
    }

    /// Search sub-properties of a field, combined with OR
    pub fn search_composite<I, K, V>(mut self, field: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let parts = parts
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        upsert(&mut self.search, field.into(), SearchValue::Composite(parts));
        self
    }

    pub fn global_search(mut self, query: impl Into<String>) -> Self {
        self.global_search = Some(query.into());
        self
    }
}

impl GridRequest for SimpleRequest {
    fn limit(&self) -> usize {
        self.limit
    }

    fn pagination(&self) -> Pagination {
        Pagination::Offset(self.offset)
    }

    fn order(&self) -> &[(String, String)] {
        &self.order
    }

    fn search(&self) -> &[(String, SearchValue)] {
        &self.search
    }

    fn global_search(&self) -> Option<&str> {
        self.global_search.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SimpleRequest::default();
        assert_eq!(request.limit(), 20);
        assert_eq!(request.pagination(), Pagination::Offset(0));
        assert!(request.order().is_empty());
        assert!(GridRequest::search(&request).is_empty());
        assert!(GridRequest::global_search(&request).is_none());
    }

    #[test]
    fn test_order_lowercased_and_ordered() {
        let request = SimpleRequest::new()
            .order_by("name", "DESC")
            .order_by("id", "Asc");

        assert_eq!(
            request.order(),
            &[
                ("name".to_string(), "desc".to_string()),
                ("id".to_string(), "asc".to_string())
            ]
        );
        assert_eq!(request.order_for("id"), Some("asc"));
        assert_eq!(request.order_for("missing"), None);
    }

    #[test]
    fn test_search_entries() {
        let request = SimpleRequest::new()
            .search("name", "acme")
            .search_composite("author", [("firstName", "jo"), ("lastName", "jo")]);

        assert_eq!(request.search_for("name"), Some(&SearchValue::term("acme")));
        assert!(matches!(
            request.search_for("author"),
            Some(SearchValue::Composite(parts)) if parts.len() == 2
        ));
    }
}
