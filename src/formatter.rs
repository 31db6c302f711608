//! Per-line formatting for the `devlog` binary.
//!
//! JSON lines go through the same [`Pipeline`] the library uses; everything
//! else is passed through unchanged.

use crate::config::Config;
use crate::error::DevlogError;
use crate::fields::FieldKeys;
use crate::format::FormatOptions;
use crate::parser::{self, LineKind};
use crate::pipeline::{self, Pipeline};
use crate::record::LogRecord;

/// Formats stdin lines with a pipeline built once from the configuration.
pub struct LineFormatter {
    pipeline: Pipeline,
    keys: FieldKeys,
}

impl LineFormatter {
    pub fn new(options: FormatOptions, keys: FieldKeys) -> Self {
        Self {
            pipeline: pipeline::format(options),
            keys,
        }
    }

    /// Formatter for `config` with color output decided by the caller.
    pub fn from_config(config: &Config, use_color: bool) -> Self {
        let options = FormatOptions {
            use_color,
            ..config.format.clone()
        };
        Self::new(options, config.keys.clone())
    }

    /// Format one line into `out`.
    ///
    /// Returns the parse error of a line that looked like JSON but was not;
    /// the line itself is still written to `out` unchanged.
    pub fn format_line(&self, line: &str, out: &mut String) -> Option<DevlogError> {
        match parser::parse_line(line, &self.keys) {
            LineKind::Json(record) => {
                self.render(record, out);
                None
            }
            LineKind::EmbeddedJson { prefix, mut record } => {
                record.message = if record.message.is_empty() {
                    prefix
                } else {
                    format!("{prefix} {}", record.message)
                };
                self.render(record, out);
                None
            }
            LineKind::Malformed(err) => {
                out.push_str(line);
                Some(err)
            }
            LineKind::Raw => {
                out.push_str(line);
                None
            }
        }
    }

    fn render(&self, mut record: LogRecord, out: &mut String) {
        self.pipeline.apply(&mut record);
        out.push_str(&record.rendered);
    }
}

/// Format a single line with a one-off pipeline.
///
/// Convenient for tests and one-shot use; loops should keep a
/// [`LineFormatter`]. Errors are those of [`LineFormatter::format_line`].
pub fn format_line(
    line: &str,
    config: &Config,
    use_color: bool,
    out: &mut String,
) -> Option<DevlogError> {
    LineFormatter::from_config(config, use_color).format_line(line, out)
}
