//! CLI command implementations
//!
//! Commands build their JSON output and return it; `run_command` writes it
//! to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::access::JsonAccessor;
use crate::collection::MemoryCollection;
use crate::config::GridConfig;
use crate::grid::GridBuilder;
use crate::request::QueryRequest;
use crate::schema::SchemaLoader;

use super::args::{Command, QueryArgs};
use super::errors::CliResult;
use super::io::{read_records, write_json};

/// Parse CLI arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let output = match cmd {
        Command::Query(args) => query(&args)?,
        Command::Schema { schema: path } => schema(&path)?,
    };
    write_json(&output)
}

/// Run one request against a records file.
///
/// Output: `{"rows": [...], "total": n, "page": p, "pages": k}`, or
/// `{"total": n}` with `--total`.
pub fn query(args: &QueryArgs) -> CliResult<Value> {
    let config = match &args.config {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };

    let request = QueryRequest::parse(
        args.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        &config,
    )?;
    let records = read_records(&args.data)?;

    let grid = GridBuilder::new(config).create_by_selectable(
        MemoryCollection::new(records, JsonAccessor),
        JsonAccessor,
        SchemaLoader::new(&args.schema),
        Some(request),
    )?;

    let total = grid.total()?;
    if args.total {
        return Ok(json!({ "total": total }));
    }

    let rows = grid.rows()?;
    Ok(json!({
        "rows": rows,
        "total": total,
        "page": grid.current_page(),
        "pages": grid.page_count()?,
    }))
}

/// Load, validate and echo a schema file
pub fn schema(path: &Path) -> CliResult<Value> {
    let schema = SchemaLoader::load_file(path)?;
    Ok(serde_json::to_value(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn temp_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    fn schema_file() -> NamedTempFile {
        temp_json(&json!({
            "fields": [
                {"name": "id", "type": "integer", "orderable": true},
                {"name": "name", "type": "string", "searchable": true, "global_search": true}
            ]
        }))
    }

    fn data_file() -> NamedTempFile {
        let records: Vec<Value> = (1..=12)
            .map(|i| json!({"id": i, "name": format!("item-{}", i)}))
            .collect();
        temp_json(&Value::Array(records))
    }

    fn args(schema: &NamedTempFile, data: &NamedTempFile, params: &[(&str, &str)]) -> QueryArgs {
        QueryArgs {
            schema: schema.path().to_path_buf(),
            data: data.path().to_path_buf(),
            config: None,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            total: false,
        }
    }

    #[test]
    fn test_query_page() {
        let (schema, data) = (schema_file(), data_file());
        let output = query(&args(
            &schema,
            &data,
            &[("limit", "5"), ("page", "3"), ("order[id]", "asc")],
        ))
        .unwrap();

        assert_eq!(output["total"], json!(12));
        assert_eq!(output["page"], json!(3));
        assert_eq!(output["pages"], json!(3));

        let rows = output["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["cells"][0], json!({"field": "id", "value": 11}));
    }

    #[test]
    fn test_query_total_only() {
        let (schema, data) = (schema_file(), data_file());
        let mut args = args(&schema, &data, &[("globalSearch", "item-1")]);
        args.total = true;

        // item-1, item-10, item-11, item-12
        assert_eq!(query(&args).unwrap(), json!({"total": 4}));
    }

    #[test]
    fn test_query_with_config() {
        let (schema, data) = (schema_file(), data_file());
        let config = temp_json(&json!({"default_limit": 4, "max_limit": 4}));
        let mut args = args(&schema, &data, &[]);
        args.config = Some(config.path().to_path_buf());

        let output = query(&args).unwrap();
        assert_eq!(output["rows"].as_array().unwrap().len(), 4);
        assert_eq!(output["pages"], json!(3));

        args.params = vec![("limit".into(), "10".into())];
        let err = query(&args).unwrap_err();
        assert_eq!(err.code(), "GRID_INVALID_REQUEST");
    }

    #[test]
    fn test_query_bad_date() {
        let schema = temp_json(&json!({
            "fields": [{"name": "created", "type": "datetime", "searchable": true}]
        }));
        let data = temp_json(&json!([{"created": "2024-01-05 10:00"}]));

        let err = query(&args(&schema, &data, &[("search[created]", "yesterday")])).unwrap_err();
        assert!(matches!(err, CliError::Grid(_)));
        assert_eq!(err.code(), "GRID_INVALID_SEARCH_VALUE");
    }

    #[test]
    fn test_schema_command() {
        let file = schema_file();
        let output = schema(file.path()).unwrap();

        let fields = output["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["name"], json!("name"));
    }

    #[test]
    fn test_schema_missing_file() {
        let err = schema(&PathBuf::from("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, CliError::Grid(_)));
    }
}
