//! datagrid - Schema-driven, paginated, orderable and searchable data grids
//!
//! A grid request (page window, orderings, per-field and global search) is
//! translated into [`Criteria`] against a [`Schema`], run against a
//! [`Selectable`] collection, and each matching record is turned into a
//! [`Row`] of schema-ordered cells.

pub mod access;
pub mod cli;
pub mod collection;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod grid;
pub mod observability;
pub mod processor;
pub mod provider;
pub mod request;
pub mod schema;

pub use access::{FieldAccessors, JsonAccessor, PropertyAccessor, SerdeAccessor};
pub use collection::{MemoryCollection, Selectable};
pub use config::{GridConfig, UnknownFieldPolicy};
pub use criteria::{Criteria, CriteriaBuilder, Expr, OrderBy, SortDirection};
pub use errors::{GridError, GridResult};
pub use grid::{Grid, GridBuilder};
pub use processor::{Cell, DataProcessor, PropertyAccessProcessor, Row};
pub use provider::{DataProvider, SelectableDataProvider};
pub use request::{GridRequest, Pagination, QueryRequest, SearchValue, SimpleRequest};
pub use schema::{Field, FieldType, Schema, SchemaProvider};
