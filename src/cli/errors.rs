//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::errors::GridError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {}", .0.code(), .0)]
    Grid(#[from] GridError),

    #[error("GRID_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("GRID_CLI_JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GRID_CLI_INVALID_INPUT: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Grid(e) => e.code(),
            Self::Io(_) => "GRID_CLI_IO_ERROR",
            Self::Json(_) => "GRID_CLI_JSON_ERROR",
            Self::InvalidInput(_) => "GRID_CLI_INVALID_INPUT",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_keeps_code() {
        let err = CliError::from(GridError::UnknownField("nope".into()));
        assert_eq!(err.code(), "GRID_UNKNOWN_FIELD");
        assert!(err.to_string().starts_with("GRID_UNKNOWN_FIELD: "));
    }

    #[test]
    fn test_io_error() {
        let err = CliError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.code(), "GRID_CLI_IO_ERROR");
        assert_eq!(err.to_string(), "GRID_CLI_IO_ERROR: gone");
    }
}
