//! Data provider over a selectable collection

use std::sync::Arc;

use super::DataProvider;
use crate::collection::Selectable;
use crate::config::GridConfig;
use crate::criteria::CriteriaBuilder;
use crate::errors::GridResult;
use crate::observability::{log_event_with_fields, GridEvent};
use crate::processor::{DataProcessor, Row};
use crate::request::GridRequest;
use crate::schema::{Schema, SchemaProvider};

/// Runs request criteria against a collection and processes the matches
pub struct SelectableDataProvider<C, P, S> {
    collection: C,
    processor: P,
    schema_provider: S,
    config: GridConfig,
}

impl<C, P, S> SelectableDataProvider<C, P, S>
where
    C: Selectable,
    P: DataProcessor<C::Item>,
    S: SchemaProvider,
{
    pub fn new(collection: C, processor: P, schema_provider: S, config: GridConfig) -> Self {
        Self {
            collection,
            processor,
            schema_provider,
            config,
        }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

impl<C, P, S> DataProvider for SelectableDataProvider<C, P, S>
where
    C: Selectable,
    P: DataProcessor<C::Item>,
    S: SchemaProvider,
{
    fn schema(&self) -> GridResult<Arc<Schema>> {
        self.schema_provider.schema()
    }

    fn data(&self, request: &dyn GridRequest) -> GridResult<Vec<Row>> {
        let schema = self.schema()?;
        let criteria = CriteriaBuilder::new(&schema, &self.config).build(request)?;

        let records = self.collection.matching(&criteria)?;
        let rows = records
            .iter()
            .map(|record| self.processor.process(record))
            .collect::<GridResult<Vec<_>>>()?;

        let row_count = rows.len().to_string();
        let first_result = criteria.first_result.unwrap_or(0).to_string();
        log_event_with_fields(
            GridEvent::DataFetched,
            &[("rows", row_count.as_str()), ("first_result", first_result.as_str())],
        );

        Ok(rows)
    }

    fn total(&self, request: &dyn GridRequest) -> GridResult<usize> {
        let schema = self.schema()?;
        let criteria = CriteriaBuilder::new(&schema, &self.config).build_unpaginated(request)?;

        let total = self.collection.count(&criteria)?;
        let count = total.to_string();
        log_event_with_fields(GridEvent::TotalComputed, &[("total", count.as_str())]);

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::JsonAccessor;
    use crate::collection::MemoryCollection;
    use crate::errors::GridError;
    use crate::processor::PropertyAccessProcessor;
    use crate::request::SimpleRequest;
    use crate::schema::{Field, FieldType, StaticSchemaProvider};
    use serde_json::{json, Value};

    type Provider = SelectableDataProvider<
        MemoryCollection<Value, JsonAccessor>,
        PropertyAccessProcessor<JsonAccessor>,
        Arc<StaticSchemaProvider>,
    >;

    fn provider() -> Provider {
        let schema = Schema::new()
            .with_field(Field::new("id", FieldType::Integer).orderable(true))
            .unwrap()
            .with_field(Field::new("name", FieldType::String).searchable(true))
            .unwrap();
        let schema_provider = Arc::new(StaticSchemaProvider::new(schema));
        let processor = PropertyAccessProcessor::new(schema_provider.schema().unwrap(), JsonAccessor);

        let records = (1..=7)
            .map(|i| json!({"id": i, "name": if i % 2 == 0 { "even" } else { "odd" }}))
            .collect();

        SelectableDataProvider::new(
            MemoryCollection::new(records, JsonAccessor),
            processor,
            schema_provider,
            GridConfig::default(),
        )
    }

    #[test]
    fn test_data_page() {
        let provider = provider();
        let request = SimpleRequest::new().with_limit(3).with_offset(3).order_by("id", "DESC");

        let rows = provider.data(&request).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.value("id").cloned().unwrap()).collect();
        assert_eq!(ids, vec![json!(4), json!(3), json!(2)]);
    }

    #[test]
    fn test_total_ignores_page() {
        let provider = provider();
        let request = SimpleRequest::new().with_limit(2).search("name", "odd");

        assert_eq!(provider.total(&request).unwrap(), 4);
        assert_eq!(provider.data(&request).unwrap().len(), 2);
    }

    #[test]
    fn test_criteria_errors_propagate() {
        let provider = provider();
        let request = SimpleRequest::new().order_by("nope", "asc");

        assert_eq!(
            provider.data(&request).unwrap_err(),
            GridError::UnknownField("nope".into())
        );
        assert!(provider.total(&request).is_err());
    }
}
