//! Declarative entity mappings
//!
//! An [`EntityMapping`] describes an entity's properties and column options in
//! code. [`SchemaBuilder`] turns it into a [`Schema`].
//!
//! # Strategies
//!
//! - `Exclude` (default): every non-static property becomes a field unless
//!   it is marked excluded; a `Column` only refines it.
//! - `Include`: only properties carrying a `Column` become fields.
//!
//! Virtual columns (getter-backed values) are added after properties under
//! both strategies.

use crate::errors::{GridError, GridResult};
use crate::observability::{log_event_with_fields, GridEvent};

use super::types::{Field, FieldType, Schema};

/// Field selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Only properties with a column definition
    Include,
    /// All properties except excluded ones
    #[default]
    Exclude,
}

/// Column options for a property or virtual column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    pub title: Option<String>,
    /// Overrides the property's declared type
    pub field_type: Option<FieldType>,
    pub width: Option<u32>,
    /// Source property override
    pub property: Option<String>,
    pub orderable: bool,
    pub order_by: Vec<String>,
    pub searchable: bool,
    pub search_by: Vec<String>,
    pub global_search: bool,
    pub priority: Option<i32>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn orderable(mut self) -> Self {
        self.orderable = true;
        self
    }

    pub fn order_by<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn search_by<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_by = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn global_search(mut self) -> Self {
        self.global_search = true;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A property of the mapped entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProperty {
    pub name: String,
    /// Type known from the entity definition, if any
    pub field_type: Option<FieldType>,
    pub column: Option<Column>,
    pub excluded: bool,
    pub is_static: bool,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type),
            column: None,
            excluded: false,
            is_static: false,
        }
    }

    /// Property whose type must come from its column
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            column: None,
            excluded: false,
            is_static: false,
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.column = Some(column);
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn static_property(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Declarative description of an entity's grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMapping {
    pub strategy: Strategy,
    pub properties: Vec<EntityProperty>,
    /// Getter-backed columns: (name, column); the column must carry a type
    pub virtual_columns: Vec<(String, Column)>,
    pub metadata: Vec<String>,
}

impl EntityMapping {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn property(mut self, property: EntityProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn virtual_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.virtual_columns.push((name.into(), column));
        self
    }

    pub fn metadata(mut self, name: impl Into<String>) -> Self {
        self.metadata.push(name.into());
        self
    }
}

/// Entity types that describe their own grid
pub trait GridEntity {
    fn grid_mapping() -> EntityMapping;
}

/// Builds schemas from entity mappings
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Build a schema from a mapping
    pub fn build(mapping: &EntityMapping) -> GridResult<Schema> {
        let mut schema = Schema::new();

        for property in &mapping.properties {
            if !Self::selects(mapping.strategy, property) {
                continue;
            }

            let field = Self::make_field(
                &property.name,
                property.field_type.as_ref(),
                property.column.as_ref(),
            )?;
            schema.add_field(field)?;
        }

        for (name, column) in &mapping.virtual_columns {
            let field = Self::make_field(name, None, Some(column))?;
            schema.add_field(field)?;
        }

        for name in &mapping.metadata {
            schema.add_metadata_property(name.clone());
        }

        let count = schema.len().to_string();
        log_event_with_fields(GridEvent::SchemaBuilt, &[("fields", count.as_str())]);

        Ok(schema)
    }

    /// Build the schema of a [`GridEntity`]
    pub fn for_entity<E: GridEntity>() -> GridResult<Schema> {
        Self::build(&E::grid_mapping())
    }

    fn selects(strategy: Strategy, property: &EntityProperty) -> bool {
        match strategy {
            Strategy::Include => property.column.is_some(),
            Strategy::Exclude => !property.is_static && !property.excluded,
        }
    }

    fn make_field(
        name: &str,
        declared: Option<&FieldType>,
        column: Option<&Column>,
    ) -> GridResult<Field> {
        let field_type = column
            .and_then(|c| c.field_type.as_ref())
            .or(declared)
            .cloned()
            .ok_or_else(|| {
                GridError::SchemaResolution(format!("Cannot resolve type of field '{}'", name))
            })?;

        let mut field = Field::new(name, field_type);

        if let Some(column) = column {
            if let Some(title) = &column.title {
                field = field.with_title(title.clone());
            }
            if let Some(width) = column.width {
                field = field.with_width(width);
            }
            if let Some(property) = &column.property {
                field = field.with_property(property.clone());
            }
            if let Some(priority) = column.priority {
                field = field.with_priority(priority);
            }
            field = field
                .orderable(column.orderable)
                .with_order_by(column.order_by.iter().cloned())
                .searchable(column.searchable)
                .with_search_by(column.search_by.iter().cloned())
                .globally_searchable(column.global_search);
        }

        Ok(field)
    }
}
