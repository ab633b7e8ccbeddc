//! Grid requests
//!
//! - `SimpleRequest`: built in code, offset pagination
//! - `QueryRequest`: parsed from HTTP query parameters, page pagination

mod query;
mod simple;
mod types;

pub use query::QueryRequest;
pub use simple::SimpleRequest;
pub use types::{GridRequest, Pagination, SearchValue};
