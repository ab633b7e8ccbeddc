//! Selectable collections
//!
//! A [`Selectable`] answers two questions for a [`Criteria`]: which
//! records match (paginated and ordered) and how many match in total.
//! [`MemoryCollection`] is the in-process implementation.

mod filters;
mod memory;
mod sorter;

pub use filters::PredicateFilter;
pub use memory::MemoryCollection;
pub use sorter::ResultSorter;

use std::sync::Arc;

use crate::criteria::Criteria;
use crate::errors::GridResult;

/// A source of records that can be queried with criteria
pub trait Selectable {
    type Item;

    /// Records matching the criteria, ordered and paginated
    fn matching(&self, criteria: &Criteria) -> GridResult<Vec<Self::Item>>;

    /// Number of records matching the criteria filters.
    ///
    /// Pagination fields are ignored.
    fn count(&self, criteria: &Criteria) -> GridResult<usize>;
}

impl<S: Selectable + ?Sized> Selectable for Arc<S> {
    type Item = S::Item;

    fn matching(&self, criteria: &Criteria) -> GridResult<Vec<Self::Item>> {
        (**self).matching(criteria)
    }

    fn count(&self, criteria: &Criteria) -> GridResult<usize> {
        (**self).count(criteria)
    }
}

impl<S: Selectable + ?Sized> Selectable for &S {
    type Item = S::Item;

    fn matching(&self, criteria: &Criteria) -> GridResult<Vec<Self::Item>> {
        (**self).matching(criteria)
    }

    fn count(&self, criteria: &Criteria) -> GridResult<usize> {
        (**self).count(criteria)
    }
}
