//! Criteria: filters, sort order and page window built from a request
//!
//! - `types`: `Expr`, `OrderBy`, `Criteria`
//! - `datetime`: whole-day windows for datetime search values
//! - `builder`: request + schema -> criteria

mod builder;
mod datetime;
mod types;

pub use builder::CriteriaBuilder;
pub use datetime::{parse_datetime, DayWindow};
pub use types::{Criteria, Expr, OrderBy, SortDirection};
