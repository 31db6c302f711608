//! Call-site capture: which line of application code issued a log call.
//!
//! [`capture`] takes a backtrace of the current thread, skips the frames that
//! belong to the backtrace machinery, the standard library and any logging
//! layers that announce themselves through marker prefixes, and parses the
//! first remaining frame. Parsing never fails: an unexpected frame shape
//! yields an empty [`CallSite`] and formatting simply omits the call-site line.

use std::backtrace::Backtrace;
use std::panic::Location;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Where in application code a log call originated.
///
/// All fields are empty strings when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallSite {
    pub function_name: String,
    pub file_path: String,
    pub line_number: String,
}

impl CallSite {
    /// Build a call site from a `#[track_caller]` location.
    ///
    /// Locations carry no function name.
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            function_name: String::new(),
            file_path: location.file().to_string(),
            line_number: location.line().to_string(),
        }
    }

    /// True when a file path was captured; only then is a call-site line rendered.
    pub fn has_file(&self) -> bool {
        !self.file_path.is_empty()
    }
}

/// Frames that are never the call site.
const BUILTIN_MARKERS: &[&str] = &[
    "std::",
    "<std::",
    "core::",
    "<core::",
    "alloc::",
    "<alloc::",
    "backtrace::",
    concat!(module_path!(), "::capture"),
];

/// `   3: path::to::function` (optionally followed by `::h<hash>`), or JS-style
/// `name@` / `at name (`.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+:\s+(?P<rust>\S.*?)(?:::h[0-9a-f]{16})?\s*$|at (?P<js>[^(]+) \(|(?P<ff>\w+)@)")
        .expect("function-name pattern is valid")
});

/// Trailing `path:line:col`.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s|\(|@)(?P<file>[^\s:()@][^\s:()]*):(?P<line>\d+):\d+\)?\s*$")
        .expect("location pattern is valid")
});

/// Frame headers in `std::backtrace::Backtrace` output (`  12: name`).
static FRAME_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+:\s").expect("frame header pattern is valid"));

/// Capture the call site of whoever called into the logging layers.
///
/// Equivalent to [`capture_skipping`] with no extra markers.
pub fn capture() -> CallSite {
    capture_skipping(&[])
}

/// Capture the call site, additionally skipping frames whose function path
/// starts with any of `markers`.
///
/// Wrapping layers pass their own module or type path here so that adding or
/// removing a layer never shifts attribution.
pub fn capture_skipping(markers: &[&str]) -> CallSite {
    let trace = Backtrace::force_capture().to_string();
    select_frame(&trace, markers)
        .map(|frame| parse_frame(&frame))
        .unwrap_or_default()
}

/// Split backtrace text into frames, each a header line plus its `at` lines.
pub fn split_frames(trace: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in trace.lines() {
        if FRAME_HEADER_RE.is_match(line) || frames.is_empty() {
            frames.push(line.to_string());
        } else if let Some(current) = frames.last_mut() {
            current.push('\n');
            current.push_str(line);
        }
    }
    frames
}

/// Pick the first frame, after the leading run of marker frames, that is not
/// itself a marker frame.
pub fn select_frame(trace: &str, markers: &[&str]) -> Option<String> {
    split_frames(trace)
        .into_iter()
        .find(|frame| !is_marker_frame(frame, markers))
}

fn is_marker_frame(frame: &str, markers: &[&str]) -> bool {
    let name = function_name(frame);
    if name.is_empty() {
        return false;
    }
    BUILTIN_MARKERS
        .iter()
        .chain(markers.iter())
        .any(|marker| name.starts_with(marker))
}

fn function_name(frame: &str) -> String {
    let header = frame.lines().next().unwrap_or_default();
    FUNCTION_RE
        .captures(header)
        .and_then(|caps| {
            caps.name("rust")
                .or_else(|| caps.name("js"))
                .or_else(|| caps.name("ff"))
        })
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parse one frame's text into a [`CallSite`].
///
/// The location must match `path:line:col`; otherwise every field is empty.
pub fn parse_frame(frame: &str) -> CallSite {
    let Some(location) = frame.lines().find_map(|line| LOCATION_RE.captures(line)) else {
        return CallSite::default();
    };

    CallSite {
        function_name: function_name(frame),
        file_path: location["file"].trim().to_string(),
        line_number: location["line"].to_string(),
    }
}

/// Anything up to and including the last `src/` path segment.
static SRC_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.*/)?src/").expect("src prefix pattern is valid"));

/// Shorten a captured file path for display.
///
/// With a base prefix (an absolute directory followed by `/`) that literal
/// prefix is removed once; otherwise everything through the last `src/`
/// segment is removed. Applying it to an already shortened path is a no-op.
pub fn normalize_path(file_path: &str, base_prefix: Option<&str>) -> String {
    match base_prefix {
        Some(prefix) => file_path
            .strip_prefix(prefix)
            .unwrap_or(file_path)
            .to_string(),
        None => SRC_PREFIX_RE.replace(file_path, "").into_owned(),
    }
}
