//! Field alias tables used to pull record fields out of JSON log lines.
//!
//! Aliases are tried in order, and the first key present wins. A key set in
//! [`FieldKeys`] replaces the alias table for that field.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Known aliases for timestamp fields.
pub const TIMESTAMP_ALIASES: &[&str] = &[
    "timestamp",
    "time",
    "ts",
    "@timestamp",
    "datetime",
    "date",
];

/// Known aliases for level fields.
pub const LEVEL_ALIASES: &[&str] = &["level", "severity", "lvl", "log.level"];

/// Known aliases for message fields.
pub const MESSAGE_ALIASES: &[&str] = &["message", "msg", "text", "event"];

/// Known aliases for the elapsed-time annotation.
pub const ELAPSED_ALIASES: &[&str] = &["ms", "elapsed"];

/// Known aliases for stack trace text.
pub const STACK_ALIASES: &[&str] = &["stack", "stack_trace", "stacktrace"];

/// Known aliases for call-site fields, in the shapes winston (`_callee`), zap
/// (`caller`) and bunyan (`src`) emit.
pub const CALLER_ALIASES: &[&str] = &["_callee", "caller", "src"];

/// Explicit keys overriding the alias tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldKeys {
    pub message: Option<String>,
    pub level: Option<String>,
    pub timestamp: Option<String>,
}

/// Remove and return the first alias present in `map`.
///
/// Removal shifts the remaining keys, so they keep their input order.
pub fn find_and_remove(map: &mut Map<String, Value>, aliases: &[&str]) -> Option<(String, Value)> {
    aliases
        .iter()
        .find_map(|&alias| map.shift_remove(alias).map(|value| (alias.to_string(), value)))
}

/// Remove `key` when it is set, otherwise the first alias present.
pub fn take_field(
    map: &mut Map<String, Value>,
    key: Option<&str>,
    aliases: &[&str],
) -> Option<Value> {
    match key {
        Some(key) => map.shift_remove(key),
        None => find_and_remove(map, aliases).map(|(_, value)| value),
    }
}
