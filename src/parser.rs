//! JSON log line parser for the `devlog` binary.
//!
//! Turns one stdin line into a [`LogRecord`] ready for the format pipeline.
//! Handles pure JSON lines, lines with a text prefix before a JSON object
//! (embedded JSON), and plain text passthrough.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::callsite::CallSite;
use crate::error::DevlogError;
use crate::fields::{self, FieldKeys};
use crate::level::Level;
use crate::record::LogRecord;
use crate::timestamp;

/// Level assigned to lines that carry none.
pub const DEFAULT_LEVEL: &str = "info";

/// `path/to/file.go:42` or `file.rs:42:7`.
static CALLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<file>.+?):(?P<line>\d+)(?::\d+)?$").expect("valid caller regex")
});

/// The parsed classification of a stdin line.
#[derive(Debug)]
pub enum LineKind {
    /// Entire line is a JSON object.
    Json(LogRecord),
    /// Text before a JSON object. The prefix is kept as a metadata-free head.
    EmbeddedJson { prefix: String, record: LogRecord },
    /// Line starts with `{` but is not valid JSON.
    Malformed(DevlogError),
    /// No JSON; passed through unmodified.
    Raw,
}

/// Classify one line and extract its record.
///
/// Detection order:
/// 1. starts with `{`: JSON object, or [`LineKind::Malformed`]
/// 2. contains `{`: embedded JSON after a prefix
/// 3. anything else, including JSON arrays and scalars: [`LineKind::Raw`]
pub fn parse_line(line: &str, keys: &FieldKeys) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Raw;
    }

    if trimmed.starts_with('{') {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => LineKind::Json(record_from_map(map, keys)),
            Ok(_) => LineKind::Raw,
            Err(e) => LineKind::Malformed(DevlogError::Parse(e.to_string())),
        };
    }

    if let Some(brace) = trimmed.find('{')
        && let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&trimmed[brace..])
    {
        return LineKind::EmbeddedJson {
            prefix: trimmed[..brace].trim_end().to_string(),
            record: record_from_map(map, keys),
        };
    }

    LineKind::Raw
}

/// Lift the known fields out of `map`; whatever remains is metadata.
pub fn record_from_map(mut map: Map<String, Value>, keys: &FieldKeys) -> LogRecord {
    let level = fields::take_field(&mut map, keys.level.as_deref(), fields::LEVEL_ALIASES)
        .and_then(level_label)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    let message = fields::take_field(&mut map, keys.message.as_deref(), fields::MESSAGE_ALIASES)
        .and_then(value_to_string)
        .unwrap_or_default();

    let timestamp =
        fields::take_field(&mut map, keys.timestamp.as_deref(), fields::TIMESTAMP_ALIASES)
            .and_then(|v| timestamp::display_value(&v));

    let ms = fields::find_and_remove(&mut map, fields::ELAPSED_ALIASES).and_then(|(_, v)| match v {
        Value::Number(n) => Some(format!("+{n}ms")),
        other => value_to_string(other),
    });

    let stack = take_string(&mut map, fields::STACK_ALIASES);
    let callsite = take_callsite(&mut map);

    LogRecord {
        level,
        message,
        timestamp,
        ms,
        stack,
        metadata: map,
        callsite,
        rendered: String::new(),
    }
}

/// Canonical label for known levels; unknown names are kept lowercased.
fn level_label(value: Value) -> Option<String> {
    if let Some(level) = Level::from_json_value(&value) {
        return Some(level.label().to_string());
    }
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_lowercase()),
        _ => None,
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Remove the first alias holding a string. Non-string values stay in `map`.
fn take_string(map: &mut Map<String, Value>, aliases: &[&str]) -> Option<String> {
    let key = aliases.iter().find(|&&k| map.get(k).is_some_and(Value::is_string))?;
    match map.shift_remove(*key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Remove the first call-site field whose shape is recognized.
fn take_callsite(map: &mut Map<String, Value>) -> Option<CallSite> {
    for &alias in fields::CALLER_ALIASES {
        let Some(value) = map.get(alias) else {
            continue;
        };
        let site = match (alias, value) {
            ("_callee", Value::Object(obj)) => {
                Some(callsite_from_object(obj, "filePath", "lineNumber", "functionName"))
            }
            (_, Value::Object(obj)) => Some(callsite_from_object(obj, "file", "line", "func")),
            (_, Value::String(s)) => callsite_from_caller(s),
            _ => None,
        };
        if let Some(site) = site.filter(CallSite::has_file) {
            map.shift_remove(alias);
            return Some(site);
        }
    }
    None
}

fn callsite_from_object(obj: &Map<String, Value>, file: &str, line: &str, func: &str) -> CallSite {
    let text = |key: &str| {
        obj.get(key)
            .cloned()
            .and_then(value_to_string)
            .unwrap_or_default()
    };
    CallSite {
        function_name: text(func),
        file_path: text(file),
        line_number: text(line),
    }
}

fn callsite_from_caller(caller: &str) -> Option<CallSite> {
    let caps = CALLER_RE.captures(caller.trim())?;
    Some(CallSite {
        function_name: String::new(),
        file_path: caps["file"].to_string(),
        line_number: caps["line"].to_string(),
    })
}
