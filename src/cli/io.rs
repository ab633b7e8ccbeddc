//! JSON I/O handling for CLI
//!
//! - Input: JSON files (UTF-8)
//! - Output: single JSON document via stdout

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read the records file: a JSON array of objects
pub fn read_records(path: &Path) -> CliResult<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content)? {
        Value::Array(records) => Ok(records),
        _ => Err(CliError::InvalidInput(format!(
            "{}: expected a JSON array of records",
            path.display()
        ))),
    }
}

/// Write a JSON document to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
