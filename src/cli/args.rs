//! CLI argument definitions using clap
//!
//! Commands:
//! - datagrid query --schema <path> --data <path> [--config <path>] [-p key=value]... [--total]
//! - datagrid schema --schema <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// datagrid - Schema-driven, paginated, searchable data grids
#[derive(Parser, Debug)]
#[command(name = "datagrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one grid request against a JSON data file
    Query(QueryArgs),

    /// Print a schema file after validation
    Schema {
        /// Path to the JSON schema file
        #[arg(long)]
        schema: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Path to the JSON schema file
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to a JSON array of records
    #[arg(long)]
    pub data: PathBuf,

    /// Path to a grid configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request parameter, e.g. `-p page=2 -p 'order[name]=desc'`
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Print only the total number of matching records
    #[arg(long)]
    pub total: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Split a `key=value` argument
fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}
