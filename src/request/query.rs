//! # Query Parameter Request
//!
//! Page-based request parsed from decoded HTTP query parameters.
//!
//! Recognized keys:
//! - `limit=20`, `page=2`
//! - `order[name]=desc` or compact `order=name:desc,id:asc`
//! - `search[name]=acme`, `search[author][lastName]=doe` (composite) or
//!   compact `search=name:acme,email:acme`
//! - `globalSearch=acme` or `globalSearch=query:acme`
//!
//! Unknown keys are ignored.

use url::form_urlencoded;

use crate::config::GridConfig;
use crate::errors::{GridError, GridResult};

use super::types::{upsert, GridRequest, Pagination, SearchValue};

/// Request backed by query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    limit: usize,
    page: usize,
    order: Vec<(String, String)>,
    search: Vec<(String, SearchValue)>,
    global_search: Option<String>,
}

impl QueryRequest {
    /// Parse ordered (key, value) pairs
    pub fn parse<I, K, V>(params: I, config: &GridConfig) -> GridResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut result = QueryRequest {
            limit: config.default_limit,
            page: 1,
            order: Vec::new(),
            search: Vec::new(),
            global_search: None,
        };

        for (key, value) in params {
            let key = key.as_ref();
            let value = value.as_ref();

            match key {
                "limit" => {
                    result.limit = parse_limit(value)?;
                }
                "page" => {
                    result.page = parse_page(value)?;
                }
                "order" => {
                    for (field, direction) in parse_compact_pairs(value, "order")? {
                        let direction = if direction.is_empty() { "asc" } else { direction };
                        upsert(&mut result.order, field.to_string(), direction.to_lowercase());
                    }
                }
                "search" => {
                    for (field, term) in parse_compact_pairs(value, "search")? {
                        result.add_search_term(field, term)?;
                    }
                }
                "globalSearch" => {
                    let query = value.strip_prefix("query:").unwrap_or(value).trim();
                    result.global_search = (!query.is_empty()).then(|| query.to_string());
                }
                _ if key.starts_with("order[") => {
                    let segments = parse_brackets(key, "order")?;
                    let [field] = segments.as_slice() else {
                        return Err(GridError::InvalidRequest(format!(
                            "Invalid order parameter: {}",
                            key
                        )));
                    };
                    upsert(&mut result.order, field.to_string(), value.trim().to_lowercase());
                }
                _ if key.starts_with("search[") => {
                    let segments = parse_brackets(key, "search")?;
                    match segments.as_slice() {
                        [field] => result.add_search_term(field, value)?,
                        [field, sub] => result.add_search_part(field, sub, value)?,
                        _ => {
                            return Err(GridError::InvalidRequest(format!(
                                "Invalid search parameter: {}",
                                key
                            )))
                        }
                    }
                }
                _ => {}
            }
        }

        if result.limit > config.max_limit {
            return Err(GridError::InvalidRequest(format!(
                "Limit {} exceeds maximum {}",
                result.limit, config.max_limit
            )));
        }

        Ok(result)
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// Keys and values are percent-decoded and `+` becomes a space, so
    /// `search%5Bname%5D=a+b` reads as `search[name]=a b`.
    pub fn parse_query_string(query: &str, config: &GridConfig) -> GridResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::parse(form_urlencoded::parse(query.as_bytes()), config)
    }

    /// 1-indexed page number
    pub fn page(&self) -> usize {
        self.page
    }

    fn add_search_term(&mut self, field: &str, term: &str) -> GridResult<()> {
        if matches!(self.search_for(field), Some(SearchValue::Composite(_))) {
            return Err(GridError::InvalidRequest(format!(
                "Search on '{}' mixes plain and composite values",
                field
            )));
        }
        upsert(
            &mut self.search,
            field.to_string(),
            SearchValue::Term(term.to_string()),
        );
        Ok(())
    }

    fn add_search_part(&mut self, field: &str, sub: &str, term: &str) -> GridResult<()> {
        match self.search.iter_mut().find(|(f, _)| f == field) {
            Some((_, SearchValue::Composite(parts))) => {
                upsert(parts, sub.to_string(), term.to_string());
                Ok(())
            }
            Some((_, SearchValue::Term(_))) => Err(GridError::InvalidRequest(format!(
                "Search on '{}' mixes plain and composite values",
                field
            ))),
            None => {
                self.search.push((
                    field.to_string(),
                    SearchValue::Composite(vec![(sub.to_string(), term.to_string())]),
                ));
                Ok(())
            }
        }
    }
}

impl GridRequest for QueryRequest {
    fn limit(&self) -> usize {
        self.limit
    }

    fn pagination(&self) -> Pagination {
        Pagination::Page(self.page)
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

/// Parse limit parameter
fn parse_limit(value: &str) -> GridResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(GridError::InvalidRequest(format!("Invalid limit: {}", value))),
    }
}

/// Parse page parameter
fn parse_page(value: &str) -> GridResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(GridError::InvalidRequest(format!("Invalid page: {}", value))),
    }
}

/// Parse `field:value,field:value`; a missing `:value` yields ""
fn parse_compact_pairs<'a>(value: &'a str, param: &str) -> GridResult<Vec<(&'a str, &'a str)>> {
    let mut pairs = Vec::new();

    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (field, rest) = part.split_once(':').unwrap_or((part, ""));
        let field = field.trim();
        if field.is_empty() {
            return Err(GridError::InvalidRequest(format!(
                "Missing field name in {}: {}",
                param, part
            )));
        }

        pairs.push((field, rest.trim()));
    }

    Ok(pairs)
}

/// Split `prefix[a][b]` into ["a", "b"]
fn parse_brackets<'a>(key: &'a str, prefix: &str) -> GridResult<Vec<&'a str>> {
    let invalid = || GridError::InvalidRequest(format!("Malformed parameter: {}", key));

    let mut rest = key.strip_prefix(prefix).ok_or_else(invalid)?;
    let mut segments = Vec::new();

    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(invalid)?;
        let end = inner.find(']').ok_or_else(invalid)?;
        let segment = &inner[..end];
        if segment.is_empty() {
            return Err(invalid());
        }
        segments.push(segment);
        rest = &inner[end + 1..];
    }

    if segments.is_empty() {
        return Err(invalid());
    }

    Ok(segments)
}
