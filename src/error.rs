//! Error types for `devlog`.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

/// Errors that can occur in `devlog`.
///
/// Formatting itself never fails; these cover configuration loading and
/// writing rendered records. In the CLI they map to exit codes:
/// [`Config`](Self::Config) and [`Toml`](Self::Toml) → exit 1,
/// [`Io`](Self::Io) → exit 2.
#[derive(Debug, Error)]
pub enum DevlogError {
    /// Configuration error (invalid option value, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while writing a rendered record.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error, surfaced by the CLI in `--verbose` mode.
    #[error("parse error: {0}")]
    Parse(String),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}
