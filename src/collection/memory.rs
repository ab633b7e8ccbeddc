//! In-memory selectable collection
//!
//! Selection flow:
//! 1. Filter records by the criteria predicates
//! 2. Sort by the criteria orderings
//! 3. Skip `first_result`
//! 4. Take `max_results`
//! 5. Return owned copies of the page

use super::filters::PredicateFilter;
use super::sorter::ResultSorter;
use super::Selectable;
use crate::access::PropertyAccessor;
use crate::criteria::Criteria;
use crate::errors::GridResult;

/// A `Vec` of records queried through a property accessor
pub struct MemoryCollection<T, A> {
    records: Vec<T>,
    accessor: A,
}

impl<T, A> MemoryCollection<T, A>
where
    A: PropertyAccessor<T>,
{
    pub fn new(records: Vec<T>, accessor: A) -> Self {
        Self { records, accessor }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn filtered(&self, criteria: &Criteria) -> Vec<&T> {
        self.records
            .iter()
            .filter(|record| PredicateFilter::matches(*record, &criteria.filters, &self.accessor))
            .collect()
    }
}

impl<T, A> Selectable for MemoryCollection<T, A>
where
    T: Clone,
    A: PropertyAccessor<T>,
{
    type Item = T;

    fn matching(&self, criteria: &Criteria) -> GridResult<Vec<T>> {
        // Step 1: Filter
        let candidates = self.filtered(criteria);

        // Step 2: Sort
        let sorted = ResultSorter::sort(candidates, &criteria.orderings, &self.accessor);

        // Steps 3-5: Page window
        let page = sorted
            .into_iter()
            .skip(criteria.first_result.unwrap_or(0))
            .take(criteria.max_results.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(page)
    }

    fn count(&self, criteria: &Criteria) -> GridResult<usize> {
        Ok(self.filtered(criteria).len())
    }
}
