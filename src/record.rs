//! The structured log record flowing through the format pipeline.

use serde_json::{Map, Value};

use crate::callsite::CallSite;

/// Metadata key under which winston-style producers carry the call site.
///
/// Never rendered as metadata; the JSON line parser lifts it into
/// [`LogRecord::callsite`].
pub const CALLSITE_FIELD: &str = "_callee";

/// One logging call on its way through the pipeline.
///
/// Stages may rewrite `level`, `message`, `timestamp` and `ms`; the
/// [`DevConsoleFormat`](crate::format::DevConsoleFormat) stage is the only
/// one that writes [`rendered`](Self::rendered).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    /// Level label, possibly wrapped in ANSI color codes.
    pub level: String,
    pub message: String,
    pub timestamp: Option<String>,
    /// Elapsed time since the previous record (e.g. `+12ms`).
    pub ms: Option<String>,
    /// Stack trace text, present when the payload carried an error.
    pub stack: Option<String>,
    /// Extra structured payload passed alongside the message.
    pub metadata: Map<String, Value>,
    /// Call site attached directly to the record. Takes precedence over the
    /// [relay](crate::relay).
    pub callsite: Option<CallSite>,
    /// Final display text.
    pub rendered: String,
}

impl LogRecord {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    #[must_use]
    pub fn with_ms(mut self, ms: impl Into<String>) -> Self {
        self.ms = Some(ms.into());
        self
    }

    #[must_use]
    pub fn with_callsite(mut self, callsite: CallSite) -> Self {
        self.callsite = Some(callsite);
        self
    }
}
