//! Grid facade
//!
//! A [`Grid`] binds a data provider to one request. [`GridBuilder`] wires
//! the stock pieces: a selectable collection, a property-access processor
//! and a schema provider.

use std::cell::OnceCell;
use std::sync::Arc;

use crate::access::PropertyAccessor;
use crate::collection::Selectable;
use crate::config::GridConfig;
use crate::errors::GridResult;
use crate::processor::{PropertyAccessProcessor, Row};
use crate::provider::{DataProvider, SelectableDataProvider};
use crate::request::{GridRequest, Pagination, QueryRequest, SimpleRequest};
use crate::schema::{Schema, SchemaProvider};

/// One request against one data provider
pub struct Grid<D> {
    provider: D,
    request: Box<dyn GridRequest>,
    total: OnceCell<usize>,
}

impl<D: DataProvider> Grid<D> {
    pub fn new(provider: D, request: Box<dyn GridRequest>) -> Self {
        Self {
            provider,
            request,
            total: OnceCell::new(),
        }
    }

    pub fn provider(&self) -> &D {
        &self.provider
    }

    pub fn request(&self) -> &dyn GridRequest {
        self.request.as_ref()
    }

    pub fn schema(&self) -> GridResult<Arc<Schema>> {
        self.provider.schema()
    }

    /// Rows of the requested page
    pub fn rows(&self) -> GridResult<Vec<Row>> {
        self.provider.data(self.request.as_ref())
    }

    /// Number of matching records across all pages.
    ///
    /// Computed once per grid.
    pub fn total(&self) -> GridResult<usize> {
        if let Some(total) = self.total.get() {
            return Ok(*total);
        }
        let total = self.provider.total(self.request.as_ref())?;
        Ok(*self.total.get_or_init(|| total))
    }

    /// Number of pages at the request's page size
    pub fn page_count(&self) -> GridResult<usize> {
        let limit = self.request.limit();
        if limit == 0 {
            return Ok(0);
        }
        Ok(self.total()?.div_ceil(limit))
    }

    /// 1-indexed page the request points at
    pub fn current_page(&self) -> usize {
        match self.request.pagination() {
            Pagination::Page(page) => page.max(1),
            Pagination::Offset(offset) => match self.request.limit() {
                0 => 1,
                limit => offset / limit + 1,
            },
        }
    }
}

/// Creates grids sharing one configuration
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    config: GridConfig,
}

impl GridBuilder {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Grid over a selectable collection.
    ///
    /// Without a request the grid shows the first page at the configured
    /// default limit.
    pub fn create_by_selectable<C, A, S>(
        &self,
        collection: C,
        accessor: A,
        schema_provider: S,
        request: Option<QueryRequest>,
    ) -> GridResult<Grid<SelectableDataProvider<C, PropertyAccessProcessor<A>, S>>>
    where
        C: Selectable,
        A: PropertyAccessor<C::Item>,
        S: SchemaProvider,
    {
        let schema = schema_provider.schema()?;
        let processor = PropertyAccessProcessor::new(schema, accessor);
        let provider =
            SelectableDataProvider::new(collection, processor, schema_provider, self.config.clone());

        let request: Box<dyn GridRequest> = match request {
            Some(request) => Box::new(request),
            None => Box::new(SimpleRequest::new().with_limit(self.config.default_limit)),
        };

        Ok(Grid::new(provider, request))
    }
}
