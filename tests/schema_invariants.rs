//! Schema Invariant Tests
//!
//! - Schema files load once and keep field order
//! - Duplicate or untyped fields are rejected
//! - Configuration files drive unknown-field handling and limits

use std::fs;
use std::sync::Arc;

use datagrid::schema::{Column, EntityMapping, EntityProperty, SchemaBuilder, SchemaLoader, Strategy};
use datagrid::{
    CriteriaBuilder, FieldType, GridConfig, GridError, QueryRequest, SchemaProvider,
    UnknownFieldPolicy,
};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_file(dir: &TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, value.to_string()).unwrap();
    path
}

fn schema_json() -> serde_json::Value {
    json!({
        "fields": [
            {"name": "id", "type": "int", "orderable": true},
            {"name": "name", "type": "string", "searchable": true, "global_search": true,
             "order_by": ["last_name", "first_name"], "orderable": true},
            {"name": "joined", "type": "date", "searchable": true, "property": "meta.joined"}
        ],
        "metadata": ["href"]
    })
}

// =============================================================================
// Loader Tests
// =============================================================================

/// Loading preserves field order, types and options.
#[test]
fn test_schema_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "schema.json", &schema_json());

    let schema = SchemaLoader::load_file(&path).unwrap();
    let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["id", "name", "joined"]);

    assert_eq!(schema.field("id").unwrap().field_type(), &FieldType::Integer);
    assert!(schema.field("joined").unwrap().field_type().is_datetime());
    assert_eq!(schema.field("joined").unwrap().source_property(), "meta.joined");
    assert_eq!(schema.field("name").unwrap().order_by(), ["last_name", "first_name"]);
    assert_eq!(schema.metadata_properties(), ["href"]);

    let reloaded = SchemaLoader::parse(&serde_json::to_string(&schema).unwrap()).unwrap();
    assert_eq!(reloaded, schema);
}

/// The loader reads the file once; later edits are not observed.
#[test]
fn test_loader_caches_schema() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "schema.json", &schema_json());
    let loader = SchemaLoader::new(&path);

    let first = loader.schema().unwrap();
    fs::remove_file(&path).unwrap();
    let second = loader.schema().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

/// Duplicate field names fail schema resolution.
#[test]
fn test_duplicate_field_rejected() {
    let content = json!({
        "fields": [
            {"name": "id", "type": "integer"},
            {"name": "id", "type": "string"}
        ]
    })
    .to_string();

    assert!(SchemaLoader::parse(&content).is_err());
}

/// Missing files fail with SchemaResolution.
#[test]
fn test_missing_schema_file() {
    let tmp = TempDir::new().unwrap();
    let loader = SchemaLoader::new(tmp.path().join("absent.json"));

    assert!(matches!(loader.schema(), Err(GridError::SchemaResolution(_))));
}

// =============================================================================
// Mapping Tests
// =============================================================================

/// A property without a type anywhere cannot become a field.
#[test]
fn test_untyped_property_rejected() {
    let mapping = EntityMapping::new(Strategy::Exclude)
        .property(EntityProperty::new("id", FieldType::Integer))
        .property(EntityProperty::untyped("payload"));

    assert!(matches!(
        SchemaBuilder::build(&mapping),
        Err(GridError::SchemaResolution(_))
    ));

    let typed = EntityMapping::new(Strategy::Exclude)
        .property(EntityProperty::untyped("payload").column(Column::new().field_type(FieldType::String)));
    assert_eq!(SchemaBuilder::build(&typed).unwrap().len(), 1);
}

// =============================================================================
// Configuration Tests
// =============================================================================

/// `unknown_fields: ignore` skips unknown order/search fields.
#[test]
fn test_config_file_unknown_field_policy() {
    let tmp = TempDir::new().unwrap();
    let schema = SchemaLoader::load_file(&write_file(&tmp, "schema.json", &schema_json())).unwrap();
    let strict = GridConfig::default();
    let lenient = GridConfig::load(&write_file(
        &tmp,
        "grid.json",
        &json!({"unknown_fields": "ignore"}),
    ))
    .unwrap();
    assert_eq!(lenient.unknown_fields, UnknownFieldPolicy::Ignore);

    let request = QueryRequest::parse_query_string("order[ghost]=asc&search[ghost]=x", &strict).unwrap();

    assert_eq!(
        CriteriaBuilder::new(&schema, &strict).build(&request),
        Err(GridError::UnknownField("ghost".into()))
    );

    let criteria = CriteriaBuilder::new(&schema, &lenient).build(&request).unwrap();
    assert!(criteria.orderings.is_empty());
    assert!(criteria.filters.is_empty());
}

/// Expanded orderings follow the field's declared order_by list.
#[test]
fn test_order_by_expansion_from_file() {
    let tmp = TempDir::new().unwrap();
    let schema = SchemaLoader::load_file(&write_file(&tmp, "schema.json", &schema_json())).unwrap();
    let config = GridConfig::default();
    let request = QueryRequest::parse_query_string("order[name]=DESC&order[id]=asc", &config).unwrap();

    let criteria = CriteriaBuilder::new(&schema, &config).build(&request).unwrap();
    let keys: Vec<_> = criteria
        .orderings
        .iter()
        .map(|o| format!("{} {}", o.field, o.direction.as_str()))
        .collect();
    assert_eq!(keys, vec!["last_name desc", "first_name desc", "id asc"]);
}

/// Invalid limits in a config file are rejected on load.
#[test]
fn test_invalid_config_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "grid.json", &json!({"default_limit": 50, "max_limit": 10}));

    assert!(matches!(GridConfig::load(&path), Err(GridError::Config(_))));
}
