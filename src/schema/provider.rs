//! Schema providers
//!
//! A provider hands out the schema of one grid. Schemas are read-only once
//! built and shared behind an `Arc`.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::errors::GridResult;

use super::mapping::{GridEntity, SchemaBuilder};
use super::types::Schema;

/// Supplies the schema of a grid
pub trait SchemaProvider {
    fn schema(&self) -> GridResult<Arc<Schema>>;
}

/// Provider over an already built schema
#[derive(Debug, Clone)]
pub struct StaticSchemaProvider {
    schema: Arc<Schema>,
}

impl StaticSchemaProvider {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }
}

impl From<Schema> for StaticSchemaProvider {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn schema(&self) -> GridResult<Arc<Schema>> {
        Ok(Arc::clone(&self.schema))
    }
}

/// Provider building an entity's schema on first use and caching it.
///
/// Two threads racing on the first call may both build; the first stored
/// schema wins and both results are equivalent.
pub struct EntitySchemaProvider<E> {
    cache: OnceLock<Arc<Schema>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: GridEntity> EntitySchemaProvider<E> {
    pub fn new() -> Self {
        Self {
            cache: OnceLock::new(),
            _entity: PhantomData,
        }
    }

    /// True once the schema has been built
    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }
}

impl<E: GridEntity> Default for EntitySchemaProvider<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GridEntity> SchemaProvider for EntitySchemaProvider<E> {
    fn schema(&self) -> GridResult<Arc<Schema>> {
        if let Some(schema) = self.cache.get() {
            return Ok(Arc::clone(schema));
        }

        let built = Arc::new(SchemaBuilder::for_entity::<E>()?);
        let _ = self.cache.set(Arc::clone(&built));

        Ok(self.cache.get().cloned().unwrap_or(built))
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Arc<P> {
    fn schema(&self) -> GridResult<Arc<Schema>> {
        (**self).schema()
    }
}
