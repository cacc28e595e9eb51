//! CLI argument definitions for the AE standardization studio.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ae-studio",
    version,
    about = "AE Standardization Studio - Convert adverse event data to SDTM format",
    long_about = "Convert raw adverse event exports to the SDTM AE domain.\n\n\
                  Canonicalizes dates, maps controlled terminology, derives\n\
                  seriousness flags, and validates against SDTMIG v3.4."
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
    /// Transform a raw AE export and validate the standardized table.
    Process(ProcessArgs),

    /// Validate an already-standardized AE table.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the raw AE export CSV.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Study identifier stamped into every record (default: derived from
    /// the input file name).
    #[arg(long = "study-id", value_name = "ID")]
    pub study_id: Option<String>,

    /// Output directory for generated files (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path for the JSON compliance report (default: ae_report.json in the
    /// output directory).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit non-zero when the report contains errors.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the standardized AE table CSV.
    #[arg(value_name = "STANDARD")]
    pub input: PathBuf,

    /// Path for the JSON compliance report (not written by default).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
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
