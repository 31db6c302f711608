//! Line composer: lays out one record as a block of connected lines.
//!
//! ```text
//! info:┏ Debug an object
//! info:┃ at handlers.rs:27 [my_app::handlers::create_user]
//! info:┃ [1] {
//! info:┃ [2]   make: 'Ford',
//! info:┃ [3]   model: 'Mustang',
//! info:┃ [4]   year: 1969
//! info:┗ [5] }
//! ```
//!
//! A record without call site or metadata renders as a single line with the
//! `▪` glyph.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use owo_colors::{OwoColorize, Style};
use regex::Regex;

use crate::callsite::CallSite;

const RESET: &str = "\x1b[0m";

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI pattern is valid"));

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]+m").expect("color pattern is valid"));

/// Remove ANSI SGR sequences.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(s, "")
}

/// Display width in characters, ignoring ANSI SGR sequences.
pub fn visible_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// The first SGR sequence embedded in a colored level label, or `""`.
pub fn leading_color(level: &str) -> &str {
    COLOR_RE.find(level).map_or("", |m| m.as_str())
}

/// Box-drawing connectors for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub single_line: char,
    pub start_line: char,
    pub line: char,
    pub end_line: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            single_line: '▪',
            start_line: '┏',
            line: '┃',
            end_line: '┗',
        }
    }
}

/// Everything that ends up in one rendered block.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parts<'a> {
    /// Level label, possibly colored.
    pub level: &'a str,
    /// Message including any alignment padding.
    pub message: &'a str,
    pub ms: Option<&'a str>,
    /// Timestamp to show; `None` when timestamps are disabled or absent.
    pub timestamp: Option<&'a str>,
    /// Already normalized call site.
    pub callsite: Option<&'a CallSite>,
    /// Stack lines followed by metadata lines.
    pub meta_lines: &'a [String],
}

/// Assembles [`Parts`] into the final multi-line string.
#[derive(Debug, Clone)]
pub struct LineComposer {
    glyphs: Glyphs,
    use_color: bool,
    line_separation: bool,
}

impl LineComposer {
    pub fn new(use_color: bool, line_separation: bool) -> Self {
        Self {
            glyphs: Glyphs::default(),
            use_color,
            line_separation,
        }
    }

    #[must_use]
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn compose(&self, parts: &Parts<'_>) -> String {
        let callsite = parts.callsite.filter(|c| c.has_file());
        let color = if self.use_color {
            leading_color(parts.level)
        } else {
            ""
        };
        let (pad, body) = split_padding(parts.message);

        let opens_block = !parts.meta_lines.is_empty() || callsite.is_some();
        let head_glyph = if opens_block {
            self.glyphs.start_line
        } else {
            self.glyphs.single_line
        };

        let mut head = format!("{}:{pad}{}", parts.level, self.glyph(color, head_glyph));
        if body.trim().is_empty() {
            head.push_str(&self.faint("(no message)"));
        } else {
            head.push_str(body);
        }
        if let Some(ms) = parts.ms {
            head.push_str(&self.faint(&format!(" {ms}")));
        }

        let mut lines = vec![head];
        let continuation = |glyph: char| {
            format!(
                "{}:{pad}{}",
                self.paint(parts.level, Style::new().dimmed()),
                self.glyph(color, glyph)
            )
        };

        if let Some(timestamp) = parts.timestamp {
            let mut line = continuation(self.glyphs.line);
            line.push_str(&self.faint(&timestamp.replacen('T', " ", 1)));
            lines.push(line);
        }

        if let Some(site) = callsite {
            let glyph = if parts.meta_lines.is_empty() {
                self.glyphs.end_line
            } else {
                self.glyphs.line
            };
            let mut location = format!("at {}:{}", site.file_path, site.line_number);
            if !site.function_name.is_empty() {
                let _ = write!(location, " [{}]", site.function_name);
            }
            let mut line = continuation(glyph);
            line.push_str(&self.faint(&location));
            lines.push(line);
        }

        let total = parts.meta_lines.len();
        let width = total.to_string().len();
        for (index, meta) in parts.meta_lines.iter().enumerate() {
            let glyph = if index + 1 == total {
                self.glyphs.end_line
            } else {
                self.glyphs.line
            };
            let number = format!("[{:0width$}]", index + 1);
            let mut line = continuation(glyph);
            let _ = write!(
                line,
                "{} {meta}",
                self.paint(&number, Style::new().dimmed())
            );
            lines.push(line);
        }

        let mut rendered = lines.join("\n");
        if self.line_separation {
            rendered.push('\n');
        }
        rendered
    }

    /// Connector glyph in the level's color, followed by one space.
    fn glyph(&self, color: &str, glyph: char) -> String {
        if self.use_color {
            format!("{color}{}{RESET} ", glyph.dimmed())
        } else {
            format!("{glyph} ")
        }
    }

    fn faint(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed().italic())
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Split a message into its leading whitespace and the rest.
fn split_padding(message: &str) -> (&str, &str) {
    let body = message.trim_start();
    (&message[..message.len() - body.len()], body)
}
