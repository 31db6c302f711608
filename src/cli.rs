//! Command-line argument definitions for `devlog`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::Deserialize;

/// Render JSON log lines from stdin in the developer console format.
///
/// Each JSON line becomes a block with its call site, metadata and stack
/// trace laid out under the message. Non-JSON lines are passed through
/// unchanged.
#[derive(Debug, Parser)]
#[command(name = "devlog", version, about, long_about = None)]
pub struct Cli {
    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    /// Defaults to `auto` unless the config file says otherwise.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Prefix stripped from call-site paths.
    ///
    /// Without it, everything up to the last `src/` directory is stripped.
    #[arg(short = 'b', long)]
    pub base_path: Option<PathBuf>,

    /// Show each record's timestamp on its own line.
    #[arg(short = 'T', long)]
    pub timestamps: bool,

    /// Do not print a blank line after each block.
    #[arg(long)]
    pub no_line_separation: bool,

    /// Nesting depth shown for metadata before collapsing to `[Object]`.
    #[arg(short = 'd', long)]
    pub depth: Option<usize>,

    /// Print metadata objects that fit within the line width on one line.
    #[arg(long)]
    pub compact: bool,

    /// Override the JSON key used for the log message field.
    #[arg(short = 'm', long)]
    pub message_key: Option<String>,

    /// Override the JSON key used for the log level field.
    #[arg(long)]
    pub level_key: Option<String>,

    /// Override the JSON key used for the timestamp field.
    #[arg(short = 't', long)]
    pub timestamp_key: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report lines that start with `{` but fail to parse as JSON.
    ///
    /// The line is still passed through; the parse error goes to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}
