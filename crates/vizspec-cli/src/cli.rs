//! CLI argument definitions for the vizspec replay tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vizspec",
    version,
    about = "Replay chart-composition scripts against a field catalog",
    long_about = "Build a main-view chart step by step from a JSON action script.\n\n\
                  Prints the resulting pills, spec source and effective spec, and can\n\
                  persist collected views to a JSON collection file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Replay an action script and print the resulting view.
    Replay(ReplayArgs),

    /// List the fields of a catalog.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// JSON array of actions to replay.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// JSON array of field descriptors.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Settings file (default: the per-user config file, if present).
    #[arg(long = "settings", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Collection file; overrides `[collection] path` from settings.
    #[arg(long = "collection", value_name = "FILE")]
    pub collection: Option<PathBuf>,

    /// How to print the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// JSON array of field descriptors.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
