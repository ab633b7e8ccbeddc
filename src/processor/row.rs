//! Processed rows and cells

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::schema::Field;

/// A single value in a row, bound to its schema field
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Value read from the record
    pub value: Value,
    /// Field the value belongs to
    pub field: Arc<Field>,
}

impl Cell {
    pub fn new(field: Arc<Field>, value: Value) -> Self {
        Self { value, field }
    }

    /// Returns the field name
    pub fn name(&self) -> &str {
        self.field.name()
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Cell", 2)?;
        state.serialize_field("field", self.field.name())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// One processed record: cells in schema order plus metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    /// One cell per schema field
    pub cells: Vec<Cell>,
    /// Metadata values keyed by property name
    pub metadata: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell for a field name
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name() == name)
    }

    /// Returns the value for a field name
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.cell(name).map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
