//! Record to row processing
//!
//! A [`DataProcessor`] turns one record into a [`Row`]. The stock
//! [`PropertyAccessProcessor`] reads metadata properties first, then one
//! cell per schema field (in schema order) at the field's source property.

mod row;

pub use row::{Cell, Row};

use std::sync::Arc;

use crate::access::PropertyAccessor;
use crate::errors::GridResult;
use crate::schema::Schema;

/// Converts records into rows
pub trait DataProcessor<T: ?Sized> {
    fn process(&self, record: &T) -> GridResult<Row>;
}

/// Processor reading every value through a property accessor
pub struct PropertyAccessProcessor<A> {
    schema: Arc<Schema>,
    accessor: A,
}

impl<A> PropertyAccessProcessor<A> {
    pub fn new(schema: Arc<Schema>, accessor: A) -> Self {
        Self { schema, accessor }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

impl<T, A> DataProcessor<T> for PropertyAccessProcessor<A>
where
    T: ?Sized,
    A: PropertyAccessor<T>,
{
    fn process(&self, record: &T) -> GridResult<Row> {
        let mut row = Row::new();

        for property in self.schema.metadata_properties() {
            let value = self.accessor.read(record, property)?;
            row.metadata.insert(property.clone(), value);
        }

        row.cells.reserve(self.schema.len());
        for field in self.schema.fields() {
            let value = self.accessor.read(record, field.source_property())?;
            row.cells.push(Cell::new(Arc::clone(field), value));
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{FieldAccessors, JsonAccessor};
    use crate::errors::GridError;
    use crate::schema::{Field, FieldType};
    use serde_json::json;

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::new()
                .with_field(Field::new("id", FieldType::Integer))
                .unwrap()
                .with_field(Field::new("author", FieldType::String).with_property("author.name"))
                .unwrap()
                .with_field(Field::new("title", FieldType::String))
                .unwrap()
                .with_metadata_property("slug"),
        )
    }

    #[test]
    fn test_cells_in_schema_order() {
        let processor = PropertyAccessProcessor::new(schema(), JsonAccessor);
        let record = json!({
            "title": "Rust",
            "id": 3,
            "slug": "rust",
            "author": {"name": "Ferris"}
        });

        let row = processor.process(&record).unwrap();
        let names: Vec<_> = row.cells.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "author", "title"]);
        assert_eq!(row.value("author"), Some(&json!("Ferris")));
        assert_eq!(row.metadata.get("slug"), Some(&json!("rust")));
    }

    #[test]
    fn test_cells_share_schema_fields() {
        let schema = schema();
        let processor = PropertyAccessProcessor::new(Arc::clone(&schema), JsonAccessor);
        let record = json!({"id": 1, "title": "t", "slug": "s", "author": {"name": "a"}});

        let row = processor.process(&record).unwrap();
        assert!(Arc::ptr_eq(&row.cells[0].field, &schema.fields()[0]));
    }

    #[test]
    fn test_read_failure_propagates() {
        let processor = PropertyAccessProcessor::new(schema(), JsonAccessor);
        let record = json!({"id": 1, "title": "t", "slug": "s"});

        let err = processor.process(&record).unwrap_err();
        assert!(matches!(err, GridError::PropertyAccess { ref property, .. } if property == "author.name"));
    }

    #[test]
    fn test_closure_accessors() {
        struct Book {
            id: u32,
            title: String,
        }

        let schema = Arc::new(
            Schema::new()
                .with_field(Field::new("id", FieldType::Integer))
                .unwrap()
                .with_field(Field::new("title", FieldType::String))
                .unwrap(),
        );
        let accessors = FieldAccessors::<Book>::new()
            .with("id", |b: &Book| b.id)
            .with("title", |b: &Book| b.title.clone());
        let processor = PropertyAccessProcessor::new(schema, accessors);

        let row = processor
            .process(&Book {
                id: 9,
                title: "Dune".into(),
            })
            .unwrap();
        assert_eq!(row.value("id"), Some(&json!(9)));
        assert_eq!(row.value("title"), Some(&json!("Dune")));
        assert!(row.metadata.is_empty());
    }
}
