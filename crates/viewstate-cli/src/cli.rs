//! CLI argument definitions for the `viewstate` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "viewstate",
    version,
    about = "Encode and decode list view state as URL query tokens",
    long_about = "Encode and decode list view state as URL query tokens.\n\n\
                  A view definition (JSON) declares the filters, their codecs and the\n\
                  fields of a list view; tokens are read and written against it."
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
    /// Print the query token of a view state.
    Encode(EncodeArgs),

    /// Print the sections of a query token.
    Decode(DecodeArgs),

    /// Merge a query token onto a view state and print the result.
    Apply(ApplyArgs),
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// View definition (JSON).
    #[arg(long = "view", value_name = "VIEW")]
    pub view: PathBuf,

    /// View state (JSON). Defaults to the view's initial state.
    #[arg(long = "state", value_name = "STATE")]
    pub state: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// View definition (JSON).
    #[arg(long = "view", value_name = "VIEW")]
    pub view: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: DecodeFormatArg,

    /// Query token to decode.
    #[arg(value_name = "TOKEN")]
    pub token: String,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// View definition (JSON).
    #[arg(long = "view", value_name = "VIEW")]
    pub view: PathBuf,

    /// Current view state (JSON). Defaults to the view's initial state.
    #[arg(long = "state", value_name = "STATE")]
    pub state: Option<PathBuf>,

    /// Keep current filters when the token has no filter section.
    ///
    /// This is how a freshly mounted view treats its first URL.
    #[arg(long = "soft")]
    pub soft: bool,

    /// Query token to apply.
    #[arg(value_name = "TOKEN")]
    pub token: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DecodeFormatArg {
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
