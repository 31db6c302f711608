//! Leveled logging front end and the call-site capturing adapter.
//!
//! [`Logger`] is a minimal host logger: it normalizes arguments into a
//! [`LogRecord`] and hands it to its sinks. [`init`] wraps any
//! [`LeveledLog`] implementation so that every call first captures the call
//! site and parks it in the [relay](crate::relay) for the duration of the
//! call, so every sink's Format Stage sees it.
//!
//! ```no_run
//! use devlog::{FormatOptions, LeveledLog, Logger, init, transport};
//! use serde_json::json;
//!
//! let log = init(Logger::new().with_sink(transport(FormatOptions::default())));
//! log.info("Logging initialized");
//! log.debug(("Debug an object", json!({"make": "Ford", "year": 1969})));
//! log.info(json!({"omitting the message": "works as well"}));
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::Write;
use std::panic::Location;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::callsite::{self, CallSite};
use crate::level::Level;
use crate::record::LogRecord;
use crate::relay;
use crate::transport::ConsoleTransport;

/// Function-path prefixes of this module's wrapper frames, skipped during
/// call-site capture.
const FRAME_MARKERS: &[&str] = &[
    concat!(module_path!(), "::LeveledLog::"),
    concat!(module_path!(), "::CallSiteLogger"),
    concat!("<", module_path!(), "::CallSiteLogger"),
];

/// Arguments of one logging call, normalized to `(message, metadata)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs {
    pub message: String,
    pub metadata: Map<String, Value>,
    pub stack: Option<String>,
}

impl LogArgs {
    /// Message and stack text from an error and its `source()` chain.
    ///
    /// A backtrace is appended when one is enabled through `RUST_BACKTRACE`.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut stack = format!("Error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = write!(stack, "\nCaused by: {cause}");
            source = cause.source();
        }
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(stack, "\n{backtrace}");
        }

        Self {
            message: err.to_string(),
            metadata: Map::new(),
            stack: Some(stack),
        }
    }

    /// Merge the entries of a JSON object into the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        if let Value::Object(map) = meta {
            self.metadata.extend(map);
        }
        self
    }

    pub fn into_record(self, level: Level) -> LogRecord {
        LogRecord {
            level: level.label().to_string(),
            message: self.message,
            stack: self.stack,
            metadata: self.metadata,
            ..LogRecord::default()
        }
    }
}

impl From<&str> for LogArgs {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<String> for LogArgs {
    fn from(message: String) -> Self {
        Self {
            message,
            ..Self::default()
        }
    }
}

/// An object becomes metadata with no message; a string becomes the message;
/// any other value is printed as the message.
impl From<Value> for LogArgs {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(metadata) => Self::from(metadata),
            Value::String(message) => Self::from(message),
            Value::Null => Self::default(),
            other => Self::from(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for LogArgs {
    fn from(metadata: Map<String, Value>) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }
}

/// Message plus metadata. A second argument that is not an object is ignored.
impl From<(&str, Value)> for LogArgs {
    fn from((message, meta): (&str, Value)) -> Self {
        Self::from(message).with_meta(meta)
    }
}

impl From<(String, Value)> for LogArgs {
    fn from((message, meta): (String, Value)) -> Self {
        Self::from(message).with_meta(meta)
    }
}

/// Receives finished records from a [`Logger`].
pub trait Sink: Send + Sync {
    fn emit(&self, record: LogRecord);
}

impl Sink for ConsoleTransport {
    fn emit(&self, record: LogRecord) {
        if let Err(e) = self.log(record) {
            eprintln!("devlog: {e}");
        }
    }
}

/// One method per level, all funneling into [`log`](Self::log).
pub trait LeveledLog {
    #[track_caller]
    fn log(&self, level: Level, args: LogArgs);

    #[track_caller]
    fn error(&self, args: impl Into<LogArgs>)
    where
        Self: Sized,
    {
        self.log(Level::Error, args.into());
    }

    #[track_caller]
    fn warn(&self, args: impl Into<LogArgs>)
    where
        Self: Sized,
    {
        self.log(Level::Warn, args.into());
    }

    #[track_caller]
    fn info(&self, args: impl Into<LogArgs>)
    where
        Self: Sized,
    {
        self.log(Level::Info, args.into());
    }

    #[track_caller]
    fn debug(&self, args: impl Into<LogArgs>)
    where
        Self: Sized,
    {
        self.log(Level::Debug, args.into());
    }

    #[track_caller]
    fn trace(&self, args: impl Into<LogArgs>)
    where
        Self: Sized,
    {
        self.log(Level::Trace, args.into());
    }
}

/// Minimal host logger fanning records out to its sinks.
#[derive(Clone, Default)]
pub struct Logger {
    sinks: Vec<Arc<dyn Sink>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }
}

impl LeveledLog for Logger {
    fn log(&self, level: Level, args: LogArgs) {
        let record = args.into_record(level);
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.emit(record.clone());
            }
            last.emit(record);
        }
    }
}

/// Wrap `logger` so every call records its call site before delegating.
///
/// The relay holds the site only while the wrapped logger runs.
pub fn init<L: LeveledLog>(logger: L) -> CallSiteLogger<L> {
    CallSiteLogger { inner: logger }
}

/// Decorator produced by [`init`].
pub struct CallSiteLogger<L> {
    inner: L,
}

impl<L> CallSiteLogger<L> {
    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: LeveledLog> LeveledLog for CallSiteLogger<L> {
    #[track_caller]
    fn log(&self, level: Level, args: LogArgs) {
        let location = Location::caller();
        let mut site = callsite::capture_skipping(FRAME_MARKERS);
        if !site.has_file() {
            site = CallSite::from_location(location);
        }
        relay::set(site);
        self.inner.log(level, args);
        relay::clear();
    }
}
