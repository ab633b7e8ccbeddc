//! Grid configuration
//!
//! Loaded from an optional JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "default_limit": 20,
//!   "max_limit": 1000,
//!   "unknown_fields": "reject",
//!   "strict_field_flags": false
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};

/// Default page size when the request does not carry a limit
pub const DEFAULT_LIMIT: usize = 20;

/// Largest page size a request may ask for
pub const MAX_LIMIT: usize = 1000;

/// What to do with order/search entries naming a field the schema lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail with `UnknownField`
    #[default]
    Reject,
    /// Skip the entry and log a warning
    Ignore,
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Page size used when the request carries none
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound for a requested page size
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Handling of unknown field names in order/search
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,

    /// Reject ordering/searching on fields not flagged orderable/searchable
    #[serde(default)]
    pub strict_field_flags: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_max_limit() -> usize {
    MAX_LIMIT
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            unknown_fields: UnknownFieldPolicy::Reject,
            strict_field_flags: false,
        }
    }
}

impl GridConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> GridResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GridError::Config(format!("Failed to read config: {}", e)))?;

        let config: GridConfig = serde_json::from_str(&content)
            .map_err(|e| GridError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate limits
    pub fn validate(&self) -> GridResult<()> {
        if self.default_limit == 0 {
            return Err(GridError::Config("default_limit must be > 0".into()));
        }

        if self.max_limit < self.default_limit {
            return Err(GridError::Config(format!(
                "max_limit ({}) must be >= default_limit ({})",
                self.max_limit, self.default_limit
            )));
        }

        Ok(())
    }

    /// Config that skips unknown fields instead of failing
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..Self::default()
        }
    }
}
