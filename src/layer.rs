//! `tracing_subscriber` layer rendering events in the developer console format.
//!
//! Events already know where they were emitted, so the call site is attached
//! to the record directly and the relay is not involved. Events carry a file
//! and line but no function name, so that part of the call site stays empty.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

use crate::callsite::CallSite;
use crate::format::FormatOptions;
use crate::level::Level;
use crate::record::LogRecord;
use crate::transport::{self, ConsoleTransport};

/// Layer that formats every event and writes it through a [`ConsoleTransport`].
pub struct DevConsoleLayer {
    transport: ConsoleTransport,
}

impl DevConsoleLayer {
    pub fn new(transport: ConsoleTransport) -> Self {
        Self { transport }
    }

    /// Developer format for `options`, written to stdout.
    pub fn stdout(options: FormatOptions) -> Self {
        Self::new(transport::transport(options))
    }
}

impl<S> Layer<S> for DevConsoleLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = event_to_record(event);
        if let Err(e) = self.transport.log(record) {
            eprintln!("devlog: {e}");
        }
    }
}

/// Install a registry with a stdout [`DevConsoleLayer`] as the global default.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_tracing(options: FormatOptions) -> bool {
    Registry::default()
        .with(DevConsoleLayer::stdout(options))
        .try_init()
        .is_ok()
}

/// Build the record for one event: `message` field as message, other fields
/// as metadata, an error-valued field as stack, event location as call site.
pub fn event_to_record(event: &Event<'_>) -> LogRecord {
    let mut fields = BTreeMap::new();
    let mut visitor = FieldVisitor {
        fields: &mut fields,
        message: None,
        stack: None,
    };
    event.record(&mut visitor);
    let FieldVisitor { message, stack, .. } = visitor;

    let meta = event.metadata();
    let callsite = meta.file().map(|file| CallSite {
        function_name: String::new(),
        file_path: file.to_string(),
        line_number: meta.line().map(|l| l.to_string()).unwrap_or_default(),
    });

    LogRecord {
        level: Level::from(meta.level()).label().to_string(),
        message: message.unwrap_or_default(),
        stack,
        metadata: fields.into_iter().collect::<Map<String, Value>>(),
        callsite,
        ..LogRecord::default()
    }
}

/// Collects event fields into JSON values.
pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<String, Value>,
    pub message: Option<String>,
    pub stack: Option<String>,
}

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        let mut stack = format!("Error: {value}");
        let mut source = value.source();
        while let Some(cause) = source {
            let _ = write!(stack, "\nCaused by: {cause}");
            source = cause.source();
        }
        if self.stack.is_none() {
            self.stack = Some(stack);
        }
        self.fields
            .insert(field.name().to_string(), Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(format!("{value:?}")));
        }
    }
}
