//! Pretty-printer for metadata values and stack traces.
//!
//! Renders [`serde_json::Value`]s in the layout developers know from Node's
//! `util.inspect`: unquoted identifier keys, single-quoted strings, two-space
//! indentation, `[Object]` / `[Array]` past the depth limit and
//! `... N more items` past the array limit. The Format Stage splits the
//! result into lines and numbers them.

use std::fmt::Display;
use std::sync::LazyLock;

use owo_colors::{OwoColorize, Style};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::compose::visible_len;

/// Pretty-printer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// Nesting depth rendered before containers collapse to a placeholder.
    /// `None` renders everything.
    pub depth: Option<usize>,
    /// Annotate values with ANSI colors.
    pub colors: bool,
    /// Array items rendered before truncation. `None` renders all items.
    pub max_array_length: Option<usize>,
    /// Column limit for collapsing a container onto one line.
    pub break_length: usize,
    /// Collapse containers onto one line when they fit `break_length`.
    /// When `false`, every non-empty container spans multiple lines.
    pub compact: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            depth: None,
            colors: true,
            max_array_length: None,
            break_length: 120,
            compact: false,
        }
    }
}

/// Stack trace text wrapped so it renders through the same printer as
/// metadata.
#[derive(Debug, Clone, Copy)]
pub struct StackTrace<'a>(pub &'a str);

/// Values the [`Inspector`] knows how to print.
pub trait Inspect {
    fn inspect_with(&self, inspector: &Inspector) -> String;
}

impl Inspect for Value {
    fn inspect_with(&self, inspector: &Inspector) -> String {
        inspector.format_value(self, 0)
    }
}

impl Inspect for serde_json::Map<String, Value> {
    fn inspect_with(&self, inspector: &Inspector) -> String {
        inspector.format_object(self, 0)
    }
}

/// Standard-library frames and toolchain paths, dimmed like Node dims its
/// internals.
static TOOLCHAIN_FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+:\s+<?(?:std|core|alloc)::|at /rustc/)")
        .expect("toolchain frame pattern is valid")
});

impl Inspect for StackTrace<'_> {
    fn inspect_with(&self, inspector: &Inspector) -> String {
        self.0
            .trim_end()
            .lines()
            .map(|line| {
                let line = line.trim_end();
                if TOOLCHAIN_FRAME_RE.is_match(line) {
                    inspector.paint(line, Style::new().dimmed())
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

const INDENT: &str = "  ";

/// Configured pretty-printer.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    options: InspectOptions,
}

impl Inspector {
    pub fn new(options: InspectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    /// Render `value` as a single string, possibly spanning several lines.
    pub fn inspect<T: Inspect + ?Sized>(&self, value: &T) -> String {
        value.inspect_with(self)
    }

    /// Render `value` and split the result into lines.
    pub fn render<T: Inspect + ?Sized>(&self, value: &T) -> Vec<String> {
        let text = self.inspect(value);
        if text.is_empty() {
            return Vec::new();
        }
        text.split('\n').map(str::to_string).collect()
    }

    /// Lines of a stack trace, toolchain frames dimmed.
    pub fn render_stack(&self, stack: &str) -> Vec<String> {
        self.render(&StackTrace(stack))
    }

    fn paint(&self, text: impl Display, style: Style) -> String {
        if self.options.colors {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn too_deep(&self, level: usize) -> bool {
        self.options.depth.is_some_and(|depth| level > depth)
    }

    fn format_value(&self, value: &Value, level: usize) -> String {
        match value {
            Value::Null => self.paint("null", Style::new().bold()),
            Value::Bool(b) => self.paint(b, Style::new().yellow()),
            Value::Number(n) => self.paint(n, Style::new().yellow()),
            Value::String(s) => self.paint(quote(s), Style::new().green()),
            Value::Array(items) => self.format_array(items, level),
            Value::Object(map) => self.format_object(map, level),
        }
    }

    fn format_array(&self, items: &[Value], level: usize) -> String {
        if items.is_empty() {
            return "[]".to_string();
        }
        if self.too_deep(level) {
            return self.paint("[Array]", Style::new().cyan());
        }

        let limit = self.options.max_array_length.unwrap_or(usize::MAX);
        let mut entries: Vec<String> = items
            .iter()
            .take(limit)
            .map(|item| self.format_value(item, level + 1))
            .collect();
        if items.len() > limit {
            let rest = items.len() - limit;
            let plural = if rest == 1 { "" } else { "s" };
            entries.push(format!("... {rest} more item{plural}"));
        }

        self.reduce(&entries, ('[', ']'), level)
    }

    fn format_object(&self, map: &serde_json::Map<String, Value>, level: usize) -> String {
        if map.is_empty() {
            return "{}".to_string();
        }
        if self.too_deep(level) {
            return self.paint("[Object]", Style::new().cyan());
        }

        let entries: Vec<String> = map
            .iter()
            .map(|(key, value)| {
                let key = if IDENTIFIER_RE.is_match(key) {
                    key.clone()
                } else {
                    self.paint(quote(key), Style::new().green())
                };
                format!("{key}: {}", self.format_value(value, level + 1))
            })
            .collect();

        self.reduce(&entries, ('{', '}'), level)
    }

    /// Join container entries either onto one line or one entry per line.
    fn reduce(&self, entries: &[String], (open, close): (char, char), level: usize) -> String {
        if self.options.compact && entries.iter().all(|e| !e.contains('\n')) {
            let width = INDENT.len() * level
                + entries.iter().map(|e| visible_len(e)).sum::<usize>()
                + 2 * entries.len()
                + 2;
            if width <= self.options.break_length {
                return format!("{open} {} {close}", entries.join(", "));
            }
        }

        let body = entries
            .iter()
            .map(|entry| {
                entry
                    .split('\n')
                    .map(|line| format!("{INDENT}{line}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join(",\n");
        format!("{open}\n{body}\n{close}")
    }
}

/// Quote a string the way Node does: single quotes unless the text contains
/// one, then double quotes, then backticks. Control characters are escaped.
fn quote(s: &str) -> String {
    let quote = if !s.contains('\'') {
        '\''
    } else if !s.contains('"') {
        '"'
    } else if !s.contains('`') && !s.contains("${") {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
