//! Schema loader for JSON schema files
//!
//! File layout:
//!
//! ```json
//! {
//!   "fields": [
//!     {"name": "id", "type": "integer", "orderable": true},
//!     {"name": "created", "type": "datetime", "searchable": true}
//!   ],
//!   "metadata": ["editable"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::errors::{GridError, GridResult};
use crate::observability::{log_event_with_fields, GridEvent};

use super::provider::SchemaProvider;
use super::types::Schema;

/// Schema provider reading a JSON file on first use
pub struct SchemaLoader {
    path: PathBuf,
    cache: OnceLock<Arc<Schema>>,
}

impl SchemaLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Returns the schema file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses a schema file.
    pub fn load_file(path: &Path) -> GridResult<Schema> {
        let content = fs::read_to_string(path).map_err(|e| {
            GridError::SchemaResolution(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        let schema = Self::parse(&content).map_err(|e| match e {
            GridError::SchemaResolution(msg) => {
                GridError::SchemaResolution(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        let count = schema.len().to_string();
        let file = path.display().to_string();
        log_event_with_fields(
            GridEvent::SchemaLoaded,
            &[("fields", count.as_str()), ("path", file.as_str())],
        );

        Ok(schema)
    }

    /// Parses schema JSON.
    pub fn parse(content: &str) -> GridResult<Schema> {
        let schema: Schema = serde_json::from_str(content)
            .map_err(|e| GridError::SchemaResolution(format!("Invalid schema JSON: {}", e)))?;

        if schema.is_empty() {
            return Err(GridError::SchemaResolution(
                "Schema must define at least one field".into(),
            ));
        }

        Ok(schema)
    }
}

impl SchemaProvider for SchemaLoader {
    fn schema(&self) -> GridResult<Arc<Schema>> {
        if let Some(schema) = self.cache.get() {
            return Ok(Arc::clone(schema));
        }

        let loaded = Arc::new(Self::load_file(&self.path)?);
        let _ = self.cache.set(Arc::clone(&loaded));

        Ok(self.cache.get().cloned().unwrap_or(loaded))
    }
}
