//! CLI argument definitions for the corona pipeline driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "corona",
    version,
    about = "Derive publication tables from COVID case and death data",
    long_about = "Derive the fixed set of publication tables from the global\n\
                  cumulative wide tables and the Colombian case line list:\n\
                  per-day deltas and totals, per-city series, outbreak-aligned\n\
                  country progressions, and origin/age/city tallies."
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
    /// Run the full fixed derivation set over a data folder.
    Run(RunArgs),

    /// List the registered derivations.
    Derivations,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder holding the already-fetched input CSVs.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for derived tables (default: <INPUT_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Global confirmed-cases wide table filename.
    #[arg(long = "cases-file", default_value = "confirmed-global.csv")]
    pub cases_file: String,

    /// Global deaths wide table filename.
    #[arg(long = "deaths-file", default_value = "confirmed-global-deaths.csv")]
    pub deaths_file: String,

    /// Colombian line-list filename.
    #[arg(long = "line-list", default_value = "Casos.csv")]
    pub line_list_file: String,

    /// Whether per-city series keep only observed dates or zero-fill the
    /// whole range.
    #[arg(long = "gap-fill", value_enum, default_value = "sparse")]
    pub gap_fill: GapFillArg,

    /// Derive and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GapFillArg {
    Sparse,
    Dense,
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
