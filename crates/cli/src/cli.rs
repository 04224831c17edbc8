//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sheet-dispatch - write output streams to one file per sheet
#[derive(Parser, Debug)]
#[command(
    name = "sheet-dispatch",
    author,
    version,
    about = "Per-sheet output dispatcher",
    long_about = "Opens one output file per sheet name under a base directory.\n\n\
                  Each sheet is written to <base_path>/<sheet>.<extension>; \n\
                  reopening a sheet truncates its file."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SHEET_DISPATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy input into a sheet file
    Write(WriteArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display configuration and existing sheets
    Info(InfoArgs),
}

/// Dispatcher location, from a config file or from flags
#[derive(Parser, Debug, Clone)]
pub struct TargetArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "SHEET_DISPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base directory for sheet files (overrides the config file)
    #[arg(short = 'o', long, env = "SHEET_DISPATCH_BASE_PATH")]
    pub base_path: Option<PathBuf>,

    /// File extension for sheet files, without the dot
    #[arg(long)]
    pub extension: Option<String>,

    /// Reject sheet names containing path separators or `..`
    #[arg(long)]
    pub strict_names: bool,
}

/// Arguments for the `write` command
#[derive(Parser, Debug, Clone)]
pub struct WriteArgs {
    /// Sheet name; becomes the file name stem
    #[arg(short, long)]
    pub sheet: String,

    /// Read from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Output the write report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "dispatch.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List sheet files already present in the base directory
    #[arg(long)]
    pub sheets: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
