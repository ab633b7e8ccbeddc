//! Request to criteria translation
//!
//! Translation rules, applied in this order:
//! 1. Page window: `max_results = limit`, `first_result = offset` or
//!    `limit * (page - 1)`
//! 2. Orderings, in request order; a field's `order_by` list expands into
//!    one key per property
//! 3. Per-field search: composite values OR their sub-property terms,
//!    datetime fields match whole days, everything else is a partial match
//! 4. Global search: OR of partial matches over globally searchable fields
//!
//! The same filter construction backs both paginated and count criteria.

use std::sync::Arc;

use crate::config::{GridConfig, UnknownFieldPolicy};
use crate::errors::{GridError, GridResult};
use crate::observability::{log_event_with_fields, GridEvent};
use crate::request::{GridRequest, SearchValue};
use crate::schema::{Field, Schema};

use super::datetime::DayWindow;
use super::types::{Criteria, Expr, OrderBy, SortDirection};

/// Builds criteria for one schema
pub struct CriteriaBuilder<'a> {
    schema: &'a Schema,
    config: &'a GridConfig,
}

impl<'a> CriteriaBuilder<'a> {
    pub fn new(schema: &'a Schema, config: &'a GridConfig) -> Self {
        Self { schema, config }
    }

    /// Criteria for one page of data
    pub fn build<R: GridRequest + ?Sized>(&self, request: &R) -> GridResult<Criteria> {
        let mut criteria = self.build_unpaginated(request)?;

        let limit = request.limit();
        criteria.max_results = Some(limit);
        criteria.first_result = Some(request.pagination().first_result(limit));

        Ok(criteria)
    }

    /// Criteria for counting: same filters and orderings, no page window
    pub fn build_unpaginated<R: GridRequest + ?Sized>(&self, request: &R) -> GridResult<Criteria> {
        let orderings = self.orderings(request)?;
        let filters = self.filters(request)?;

        let filter_count = filters.len().to_string();
        let order_count = orderings.len().to_string();
        log_event_with_fields(
            GridEvent::CriteriaBuilt,
            &[("filters", filter_count.as_str()), ("orderings", order_count.as_str())],
        );

        Ok(Criteria {
            max_results: None,
            first_result: None,
            orderings,
            filters,
        })
    }

    fn orderings<R: GridRequest + ?Sized>(&self, request: &R) -> GridResult<Vec<OrderBy>> {
        let mut orderings = Vec::new();

        for (name, raw_direction) in request.order() {
            let Some(field) = self.resolve(name)? else {
                continue;
            };

            if self.config.strict_field_flags && !field.is_orderable() {
                return Err(GridError::NotOrderable(name.clone()));
            }

            let direction = SortDirection::parse(&raw_direction.to_lowercase()).ok_or_else(|| {
                GridError::InvalidOrderDirection {
                    field: name.clone(),
                    direction: raw_direction.clone(),
                }
            })?;

            if field.order_by().is_empty() {
                orderings.push(OrderBy {
                    field: field.source_property().to_string(),
                    direction,
                });
            } else {
                orderings.extend(field.order_by().iter().map(|property| OrderBy {
                    field: property.clone(),
                    direction,
                }));
            }
        }

        Ok(orderings)
    }

    fn filters<R: GridRequest + ?Sized>(&self, request: &R) -> GridResult<Vec<Expr>> {
        let mut filters = Vec::new();

        for (name, value) in request.search() {
            // Unknown names are resolved even when the value is blank
            let Some(field) = self.resolve(name)? else {
                continue;
            };

            if value.is_blank() {
                continue;
            }

            if self.config.strict_field_flags && !field.is_searchable() {
                return Err(GridError::NotSearchable(name.clone()));
            }

            match value {
                SearchValue::Composite(parts) => {
                    let group = parts
                        .iter()
                        .filter(|(_, term)| !term.trim().is_empty())
                        .map(|(sub, term)| Expr::contains(sub.clone(), term.clone()))
                        .collect();
                    filters.push(Expr::or(group));
                }
                SearchValue::Term(term) if field.field_type().is_datetime() => {
                    self.push_date_range(&mut filters, field, term)?;
                }
                SearchValue::Term(term) => {
                    let targets = search_targets(field);
                    if let [target] = targets.as_slice() {
                        filters.push(Expr::contains(*target, term.clone()));
                    } else {
                        filters.push(Expr::or(
                            targets
                                .iter()
                                .map(|target| Expr::contains(*target, term.clone()))
                                .collect(),
                        ));
                    }
                }
            }
        }

        if let Some(group) = self.global_search(request) {
            filters.push(group);
        }

        Ok(filters)
    }

    /// `[start, end)` day window on every search target of a datetime field
    fn push_date_range(
        &self,
        filters: &mut Vec<Expr>,
        field: &Field,
        term: &str,
    ) -> GridResult<()> {
        let window = DayWindow::parse(term).map_err(|reason| {
            log_event_with_fields(
                GridEvent::SearchRejected,
                &[("field", field.name()), ("value", term)],
            );
            GridError::invalid_search_value(field.name(), term, reason)
        })?;

        let targets = search_targets(field);
        if let [target] = targets.as_slice() {
            filters.push(Expr::gte(*target, window.start));
            filters.push(Expr::lt(*target, window.end));
        } else {
            filters.push(Expr::or(
                targets
                    .iter()
                    .map(|target| {
                        Expr::and(vec![
                            Expr::gte(*target, window.start),
                            Expr::lt(*target, window.end),
                        ])
                    })
                    .collect(),
            ));
        }

        Ok(())
    }

    /// OR group over globally searchable fields; `None` when there is
    /// no query or no such field
    fn global_search<R: GridRequest + ?Sized>(&self, request: &R) -> Option<Expr> {
        let query = request.global_search().map(str::trim).filter(|q| !q.is_empty())?;

        let group: Vec<Expr> = self
            .schema
            .fields()
            .iter()
            .filter(|f| f.is_globally_searchable())
            .map(|f| Expr::contains(f.source_property(), query))
            .collect();

        (!group.is_empty()).then(|| Expr::or(group))
    }

    /// Look up a field named by the request, applying the unknown-field policy
    fn resolve(&self, name: &str) -> GridResult<Option<&'a Arc<Field>>> {
        match self.schema.field(name) {
            Some(field) => Ok(Some(field)),
            None => match self.config.unknown_fields {
                UnknownFieldPolicy::Reject => Err(GridError::UnknownField(name.to_string())),
                UnknownFieldPolicy::Ignore => {
                    log_event_with_fields(GridEvent::UnknownFieldIgnored, &[("field", name)]);
                    Ok(None)
                }
            },
        }
    }
}

/// Properties a search on `field` is matched against
fn search_targets(field: &Field) -> Vec<&str> {
    if field.search_by().is_empty() {
        vec![field.source_property()]
    } else {
        field.search_by().iter().map(String::as_str).collect()
    }
}
