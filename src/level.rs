//! Log level representation with parsing, labels, and colorization.
//!
//! Levels come from three places: `tracing` events, calls through the
//! [`LeveledLog`](crate::logger::LeveledLog) methods, and the `level` field of
//! JSON log lines read by the CLI. The latter may use names or numeric levels
//! from other frameworks (winston, bunyan, pino), so parsing is loose.

use std::fmt;

use owo_colors::Style;

/// Canonical log level enumeration.
///
/// Ordered by severity (ascending). Each variant has a numeric discriminant
/// matching the bunyan/pino convention:
/// - [`Trace`](Self::Trace) = 10
/// - [`Debug`](Self::Debug) = 20
/// - [`Info`](Self::Info) = 30
/// - [`Warn`](Self::Warn) = 40
/// - [`Error`](Self::Error) = 50
/// - [`Fatal`](Self::Fatal) = 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 10,
    Debug = 20,
    Info = 30,
    Warn = 40,
    Error = 50,
    Fatal = 60,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Lowercase label printed before the `:` separator (e.g. `"info"`).
    #[allow(clippy::trivially_copy_pass_by_ref)] // &self required since OwoColorize has conflicting trait methods
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Length of the longest label, used to align messages.
    pub fn max_label_len() -> usize {
        Self::ALL.iter().map(|l| l.label().len()).max().unwrap_or(0)
    }

    /// Returns the [`Style`] for this level's label when colors are enabled.
    ///
    /// Plain foreground colors only: the Format Stage reuses the first SGR
    /// sequence of the colored label to tint the block glyphs.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub const fn style(&self) -> Style {
        match self {
            Self::Trace => Style::new().magenta(),
            Self::Debug => Style::new().blue(),
            Self::Info => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Fatal => Style::new().bright_red(),
        }
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Accepts the winston npm level names as aliases (`verbose`, `silly`,
    /// `http`, ...). Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" | "trc" | "silly" => Some(Self::Trace),
            "debug" | "dbg" | "verbose" | "http" => Some(Self::Debug),
            "info" | "inf" | "information" | "help" | "data" | "prompt" | "input" => {
                Some(Self::Info)
            }
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" | "fatal_error" => Some(Self::Error),
            "fatal" | "critical" | "crit" | "panic" | "emerg" | "emergency" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Parse a numeric value into a [`Level`] using nearest-match rounding.
    ///
    /// Values between thresholds round to the nearest lower level.
    pub const fn from_numeric(n: i64) -> Self {
        match n {
            ..=14 => Self::Trace,
            15..=24 => Self::Debug,
            25..=34 => Self::Info,
            35..=44 => Self::Warn,
            45..=54 => Self::Error,
            55.. => Self::Fatal,
        }
    }

    /// Parse a level from a [`serde_json::Value`].
    ///
    /// Handles both string and numeric representations.
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::from_str_loose(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::from_numeric(i))
                } else {
                    #[allow(clippy::cast_possible_truncation)]
                    n.as_f64().map(|f| Self::from_numeric(f as i64))
                }
            }
            _ => None,
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
