//! Grid schemas
//!
//! A schema is built once per entity type and read-only afterwards:
//!
//! - `types`: fields, field types, the schema itself
//! - `mapping`: code-level entity mappings (include/exclude strategies)
//! - `provider`: static and cached entity providers
//! - `loader`: JSON schema files

mod loader;
mod mapping;
mod provider;
mod types;

pub use loader::SchemaLoader;
pub use mapping::{Column, EntityMapping, EntityProperty, GridEntity, SchemaBuilder, Strategy};
pub use provider::{EntitySchemaProvider, SchemaProvider, StaticSchemaProvider};
pub use types::{Field, FieldType, Schema};
