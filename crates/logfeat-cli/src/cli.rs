//! CLI argument definitions for the log feature pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "logfeat",
    version,
    about = "Log feature pipeline - fetch, enrich and load log export batches",
    long_about = "Fetch a tab-delimited log export from an object store, derive\n\
                  analytic features, and append the typed result to a warehouse\n\
                  table. A failure at any stage aborts the run before anything\n\
                  is loaded."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline for one log export object.
    Run(RunArgs),

    /// List the objects in a bucket.
    Objects(ObjectsArgs),

    /// Print the versioned schema of the destination table.
    Schema,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Root directory of the object store (one subdirectory per bucket).
    #[arg(long = "store-root", value_name = "DIR")]
    pub store_root: PathBuf,

    /// Bucket holding the log export.
    #[arg(long = "bucket", value_name = "BUCKET")]
    pub bucket: String,

    /// Object key of the tab-delimited log export.
    #[arg(long = "object", value_name = "KEY")]
    pub object: String,

    /// Destination table as project.dataset.table.
    #[arg(long = "table", value_name = "TABLE")]
    pub table: String,

    /// Root directory of the warehouse.
    #[arg(long = "warehouse-root", value_name = "DIR")]
    pub warehouse_root: PathBuf,

    /// Run every stage through coercion but skip the warehouse load.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long = "report-file", value_name = "PATH")]
    pub report_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ObjectsArgs {
    /// Root directory of the object store (one subdirectory per bucket).
    #[arg(long = "store-root", value_name = "DIR")]
    pub store_root: PathBuf,

    /// Bucket to list.
    #[arg(long = "bucket", value_name = "BUCKET")]
    pub bucket: String,

    /// Only list objects whose key starts with this prefix.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = "")]
    pub prefix: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
