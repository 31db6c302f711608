//! `devlog`: developer console formatting for structured log records.
//!
//! A record goes through a [`Pipeline`] whose last stage,
//! [`DevConsoleFormat`], lays it out as a block: the message on the first
//! line, then the call site, stack trace and pretty-printed metadata on
//! connected continuation lines. Call sites come from the record itself
//! (`tracing` events, JSON lines carrying one) or from the per-thread
//! [`relay`] filled by the [`init`] logger adapter.
//!
//! The `devlog` binary applies the same pipeline to JSON log lines on stdin.
//!
//! # Example
//!
//! ```
//! use devlog::{FormatOptions, LogRecord, format};
//! use serde_json::json;
//!
//! let pipeline = format(FormatOptions {
//!     use_color: false,
//!     add_line_separation: false,
//!     ..FormatOptions::default()
//! });
//!
//! let metadata = json!({"make": "Ford", "year": 1969});
//! let mut record = LogRecord::new("debug", "Debug an object")
//!     .with_metadata(metadata.as_object().cloned().unwrap_or_default());
//! pipeline.apply(&mut record);
//!
//! assert_eq!(
//!     record.rendered,
//!     "debug: ┏ Debug an object\n\
//!      debug: ┃ [1] {\n\
//!      debug: ┃ [2]   make: 'Ford',\n\
//!      debug: ┃ [3]   year: 1969\n\
//!      debug: ┗ [4] }"
//! );
//! ```

pub mod callsite;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod formatter;
pub mod inspect;
pub mod layer;
pub mod level;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod relay;
pub mod timestamp;
pub mod transport;

// Re-export primary API types for convenience.
pub use callsite::{CallSite, capture};
pub use config::Config;
pub use error::DevlogError;
pub use format::{DevConsoleFormat, FormatOptions};
pub use formatter::{LineFormatter, format_line};
pub use inspect::{InspectOptions, Inspector};
pub use layer::{DevConsoleLayer, init_tracing};
pub use level::Level;
pub use logger::{CallSiteLogger, LeveledLog, LogArgs, Logger, init};
pub use parser::{LineKind, parse_line};
pub use pipeline::{Pipeline, Stage, format};
pub use record::LogRecord;
pub use transport::{ConsoleTransport, transport};
