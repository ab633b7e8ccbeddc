//! # Grid Errors
//!
//! Error taxonomy shared by every grid layer.
//!
//! Request-caused errors map to 400, server-side errors to 500. Nothing is
//! recovered or retried locally; errors surface to the immediate caller.

use thiserror::Error;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Grid errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Search value could not be interpreted for the field's type
    #[error("Invalid search value '{value}' for field '{field}': {reason}")]
    InvalidSearchValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Order or search referenced a field the schema does not define
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Order direction other than asc/desc
    #[error("Invalid order direction '{direction}' for field '{field}'")]
    InvalidOrderDirection { field: String, direction: String },

    /// Ordering requested on a field not flagged orderable
    #[error("Field is not orderable: {0}")]
    NotOrderable(String),

    /// Search requested on a field not flagged searchable
    #[error("Field is not searchable: {0}")]
    NotSearchable(String),

    /// Malformed request parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Reading a property from a record failed
    #[error("Cannot read property '{property}': {reason}")]
    PropertyAccess { property: String, reason: String },

    /// Schema could not be built or loaded
    #[error("Schema error: {0}")]
    SchemaResolution(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Create an invalid search value error
    pub fn invalid_search_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GridError::InvalidSearchValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a property access error
    pub fn property_access(property: impl Into<String>, reason: impl Into<String>) -> Self {
        GridError::PropertyAccess {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            GridError::InvalidSearchValue { .. } => "GRID_INVALID_SEARCH_VALUE",
            GridError::UnknownField(_) => "GRID_UNKNOWN_FIELD",
            GridError::InvalidOrderDirection { .. } => "GRID_INVALID_ORDER_DIRECTION",
            GridError::NotOrderable(_) => "GRID_NOT_ORDERABLE",
            GridError::NotSearchable(_) => "GRID_NOT_SEARCHABLE",
            GridError::InvalidRequest(_) => "GRID_INVALID_REQUEST",
            GridError::PropertyAccess { .. } => "GRID_PROPERTY_ACCESS",
            GridError::SchemaResolution(_) => "GRID_SCHEMA_RESOLUTION",
            GridError::Config(_) => "GRID_CONFIG",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// True when the caller sent something the grid cannot honor
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GridError::InvalidSearchValue { .. }
                | GridError::UnknownField(_)
                | GridError::InvalidOrderDirection { .. }
                | GridError::NotOrderable(_)
                | GridError::NotSearchable(_)
                | GridError::InvalidRequest(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GridError::invalid_search_value("created", "nope", "bad date").status_code(),
            400
        );
        assert_eq!(GridError::UnknownField("x".into()).status_code(), 400);
        assert_eq!(
            GridError::property_access("name", "missing").status_code(),
            500
        );
        assert_eq!(
            GridError::SchemaResolution("no type".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            GridError::invalid_search_value("a", "b", "c"),
            GridError::UnknownField("a".into()),
            GridError::InvalidOrderDirection {
                field: "a".into(),
                direction: "up".into(),
            },
            GridError::NotOrderable("a".into()),
            GridError::NotSearchable("a".into()),
            GridError::InvalidRequest("a".into()),
            GridError::property_access("a", "b"),
            GridError::SchemaResolution("a".into()),
            GridError::Config("a".into()),
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = GridError::invalid_search_value("created", "not-a-date", "unrecognized date");
        let display = err.to_string();
        assert!(display.contains("created"));
        assert!(display.contains("not-a-date"));
    }
}
