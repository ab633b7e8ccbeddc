//! CLI module for datagrid
//!
//! Provides command-line interface for:
//! - query: run one grid request against a JSON records file
//! - schema: validate and print a schema file
//!
//! Logs go to stderr, filtered by `DATAGRID_LOG` (default `warn`).

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, QueryArgs};
pub use commands::{query, run_command, schema};
pub use errors::{CliError, CliResult};
pub use io::{read_records, write_json};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DATAGRID_LOG";

/// Install logging, parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    init_logging();
    commands::run()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();
}
