//! Property access by name
//!
//! Rows and in-memory filters read record values through a
//! [`PropertyAccessor`]. Three flavors:
//!
//! - [`JsonAccessor`]: `serde_json::Value` records, dotted paths
//! - [`SerdeAccessor`]: any `Serialize` record, via its JSON form
//! - [`FieldAccessors`]: hand-written closures per property name

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{GridError, GridResult};

/// Reads a named property from a record
pub trait PropertyAccessor<T: ?Sized> {
    fn read(&self, record: &T, property: &str) -> GridResult<Value>;
}

impl<T: ?Sized, A: PropertyAccessor<T> + ?Sized> PropertyAccessor<T> for Arc<A> {
    fn read(&self, record: &T, property: &str) -> GridResult<Value> {
        (**self).read(record, property)
    }
}

impl<T: ?Sized, A: PropertyAccessor<T> + ?Sized> PropertyAccessor<T> for &A {
    fn read(&self, record: &T, property: &str) -> GridResult<Value> {
        (**self).read(record, property)
    }
}

/// Accessor for JSON records.
///
/// `author.name` walks nested objects; numeric segments index arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAccessor;

impl JsonAccessor {
    /// Resolve a dotted path inside a JSON value
    pub fn lookup<'v>(record: &'v Value, property: &str) -> GridResult<&'v Value> {
        if property.is_empty() {
            return Err(GridError::property_access(property, "empty property path"));
        }

        let mut current = record;
        for segment in property.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(|| {
                GridError::property_access(property, format!("no value at '{}'", segment))
            })?;
        }

        Ok(current)
    }
}

impl PropertyAccessor<Value> for JsonAccessor {
    fn read(&self, record: &Value, property: &str) -> GridResult<Value> {
        Self::lookup(record, property).cloned()
    }
}

/// Accessor for any serializable record
pub struct SerdeAccessor<T: ?Sized> {
    _record: PhantomData<fn(&T)>,
}

impl<T: ?Sized> SerdeAccessor<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T: ?Sized> Default for SerdeAccessor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + ?Sized> PropertyAccessor<T> for SerdeAccessor<T> {
    fn read(&self, record: &T, property: &str) -> GridResult<Value> {
        let value = serde_json::to_value(record)
            .map_err(|e| GridError::property_access(property, e.to_string()))?;
        JsonAccessor::lookup(&value, property).cloned()
    }
}

type Extractor<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

/// Closure-per-property accessor
pub struct FieldAccessors<T> {
    extractors: HashMap<String, Extractor<T>>,
}

impl<T> FieldAccessors<T> {
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register the extractor for a property
    pub fn with<F, V>(mut self, property: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.extractors
            .insert(property.into(), Box::new(move |record| extract(record).into()));
        self
    }

    pub fn has(&self, property: &str) -> bool {
        self.extractors.contains_key(property)
    }
}

impl<T> Default for FieldAccessors<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.extractors.keys().collect();
        names.sort();
        f.debug_struct("FieldAccessors")
            .field("properties", &names)
            .finish()
    }
}

impl<T> PropertyAccessor<T> for FieldAccessors<T> {
    fn read(&self, record: &T, property: &str) -> GridResult<Value> {
        self.extractors
            .get(property)
            .map(|extract| extract(record))
            .ok_or_else(|| GridError::property_access(property, "no accessor registered"))
    }
}
