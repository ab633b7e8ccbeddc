//! Schema type definitions
//!
//! A schema is the ordered set of columns a grid renders, plus the names of
//! extra metadata properties attached to every row.
//!
//! Field types are open-ended tags:
//! - string, integer, float, boolean, datetime
//! - anything else is kept verbatim as `Other`

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};

/// Field type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// UTF-8 text
    String,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
    /// true/false
    Boolean,
    /// Date and time; searched by whole-day windows
    Datetime,
    /// Any other tag, kept as written
    Other(String),
}

impl FieldType {
    /// Returns the canonical type name
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
            FieldType::Other(name) => name,
        }
    }

    /// Returns true if searches on this type use date-range semantics
    pub fn is_datetime(&self) -> bool {
        matches!(self, FieldType::Datetime)
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "string" | "text" => FieldType::String,
            "int" | "integer" | "bigint" | "smallint" => FieldType::Integer,
            "float" | "decimal" | "double" => FieldType::Float,
            "bool" | "boolean" => FieldType::Boolean,
            "datetime" | "date_time" | "date" => FieldType::Datetime,
            _ => FieldType::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.type_name().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Column definition.
///
/// The name and the type are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    name: String,

    #[serde(rename = "type")]
    field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,

    /// Source property override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property: Option<String>,

    #[serde(default)]
    orderable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    order_by: Vec<String>,

    #[serde(default)]
    searchable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    search_by: Vec<String>,

    #[serde(default)]
    global_search: bool,

    /// Display ordering hint; ignored by the query layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i32>,
}

impl Field {
    /// Create a field with every flag off
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            title: None,
            width: None,
            property: None,
            orderable: false,
            order_by: Vec::new(),
            searchable: false,
            search_by: Vec::new(),
            global_search: false,
            priority: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    pub fn with_order_by<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn with_search_by<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_by = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn globally_searchable(mut self, global: bool) -> Self {
        self.global_search = global;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Explicit property override, if any
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Property the cell value is read from: the override, else the name
    pub fn source_property(&self) -> &str {
        self.property.as_deref().unwrap_or(&self.name)
    }

    pub fn is_orderable(&self) -> bool {
        self.orderable
    }

    pub fn order_by(&self) -> &[String] {
        &self.order_by
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn search_by(&self) -> &[String] {
        &self.search_by
    }

    pub fn is_globally_searchable(&self) -> bool {
        self.global_search
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }
}

/// Ordered field set plus row metadata property names.
///
/// Insertion order is display order. Names are unique; lookup by name is O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef", into = "SchemaDef")]
pub struct Schema {
    fields: Vec<Arc<Field>>,
    index: HashMap<String, usize>,
    metadata: Vec<String>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; duplicate names are rejected
    pub fn add_field(&mut self, field: Field) -> GridResult<()> {
        if self.index.contains_key(field.name()) {
            return Err(GridError::SchemaResolution(format!(
                "Duplicate field '{}'",
                field.name()
            )));
        }

        self.index.insert(field.name().to_string(), self.fields.len());
        self.fields.push(Arc::new(field));
        Ok(())
    }

    /// Builder-style `add_field`
    pub fn with_field(mut self, field: Field) -> GridResult<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Register a metadata property name (duplicates are ignored)
    pub fn add_metadata_property(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.metadata.contains(&name) {
            self.metadata.push(name);
        }
    }

    /// Builder-style `add_metadata_property`
    pub fn with_metadata_property(mut self, name: impl Into<String>) -> Self {
        self.add_metadata_property(name);
        self
    }

    /// Fields in display order
    pub fn fields(&self) -> &[Arc<Field>] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Arc<Field>> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of fields taking part in global search, in display order
    pub fn globally_searchable_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_globally_searchable())
            .map(|f| f.name())
            .collect()
    }

    pub fn metadata_properties(&self) -> &[String] {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serialized schema layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaDef {
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    metadata: Vec<String>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = GridError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        let mut schema = Schema::new();
        for field in def.fields {
            schema.add_field(field)?;
        }
        for name in def.metadata {
            schema.add_metadata_property(name);
        }
        Ok(schema)
    }
}

impl From<Schema> for SchemaDef {
    fn from(schema: Schema) -> Self {
        Self {
            fields: schema.fields.iter().map(|f| Field::clone(f)).collect(),
            metadata: schema.metadata,
        }
    }
}
