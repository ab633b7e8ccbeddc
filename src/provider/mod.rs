//! Result assembly
//!
//! A [`DataProvider`] answers a grid request with the schema, one page of
//! processed rows and the total number of matching records.

mod selectable;

pub use selectable::SelectableDataProvider;

use std::sync::Arc;

use crate::errors::GridResult;
use crate::processor::Row;
use crate::request::GridRequest;
use crate::schema::Schema;

/// Source of grid rows for a request
pub trait DataProvider {
    /// Schema the rows are built against
    fn schema(&self) -> GridResult<Arc<Schema>>;

    /// Rows of the requested page, in match order
    fn data(&self, request: &dyn GridRequest) -> GridResult<Vec<Row>>;

    /// Number of records matching the request, ignoring pagination
    fn total(&self, request: &dyn GridRequest) -> GridResult<usize>;
}
