//! The Format Stage: turns one [`LogRecord`] into its rendered block.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::callsite::{self, CallSite};
use crate::compose::{LineComposer, Parts};
use crate::inspect::{InspectOptions, Inspector};
use crate::pipeline::Stage;
use crate::record::{CALLSITE_FIELD, LogRecord};
use crate::relay;

/// Options for [`DevConsoleFormat`] and the [`format`](crate::pipeline::format)
/// factory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Prefix removed from call-site paths. Without it, everything through the
    /// last `src/` segment is removed.
    pub base_path: Option<PathBuf>,
    /// Add a continuation line with the record's timestamp.
    pub show_timestamps: bool,
    /// End every block with a blank line.
    pub add_line_separation: bool,
    pub inspect_options: InspectOptions,
    /// Emit ANSI escapes. When `false`, metadata colors are off as well.
    pub use_color: bool,
    /// Stamp records with the time elapsed since the previous one.
    pub show_elapsed: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            base_path: None,
            show_timestamps: false,
            add_line_separation: true,
            inspect_options: InspectOptions::default(),
            use_color: true,
            show_elapsed: false,
        }
    }
}

/// Multi-line developer console rendering of a record.
///
/// Reads the call site from [`LogRecord::callsite`] or, failing that, from
/// the [relay](crate::relay); renders the stack and metadata through the
/// [`Inspector`]; and overwrites [`LogRecord::rendered`].
#[derive(Debug, Clone)]
pub struct DevConsoleFormat {
    options: FormatOptions,
    /// Absolute `base_path` plus trailing separator.
    base_prefix: Option<String>,
    inspector: Inspector,
    composer: LineComposer,
}

impl DevConsoleFormat {
    pub fn new(options: FormatOptions) -> Self {
        let base_prefix = options.base_path.as_deref().map(resolve_prefix);

        let mut inspect_options = options.inspect_options.clone();
        inspect_options.colors &= options.use_color;

        Self {
            base_prefix,
            inspector: Inspector::new(inspect_options),
            composer: LineComposer::new(options.use_color, options.add_line_separation),
            options,
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Render `record` in place.
    pub fn transform(&self, record: &mut LogRecord) {
        let callsite = self.take_callsite(record);

        let mut meta_lines = Vec::new();
        if let Some(stack) = record.stack.as_deref() {
            meta_lines.extend(self.inspector.render_stack(stack));
        }
        let metadata = visible_metadata(&record.metadata);
        if !metadata.is_empty() {
            meta_lines.extend(self.inspector.render(&metadata));
        }

        let timestamp = if self.options.show_timestamps {
            record.timestamp.as_deref()
        } else {
            None
        };

        record.rendered = self.composer.compose(&Parts {
            level: &record.level,
            message: &record.message,
            ms: record.ms.as_deref(),
            timestamp,
            callsite: callsite.as_ref(),
            meta_lines: &meta_lines,
        });
    }

    /// Record-attached call site first, relay second; path shortened for display.
    fn take_callsite(&self, record: &mut LogRecord) -> Option<CallSite> {
        let mut site = record.callsite.take().or_else(relay::get)?;
        if site.has_file() {
            site.file_path = callsite::normalize_path(&site.file_path, self.base_prefix.as_deref());
        }
        Some(site)
    }
}

impl Default for DevConsoleFormat {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl Stage for DevConsoleFormat {
    fn transform(&self, record: &mut LogRecord) {
        DevConsoleFormat::transform(self, record);
    }
}

/// Metadata minus the internal call-site field.
fn visible_metadata(metadata: &Map<String, Value>) -> Map<String, Value> {
    metadata
        .iter()
        .filter(|(key, _)| key.as_str() != CALLSITE_FIELD)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Resolve `base_path` against the working directory and append `/`.
fn resolve_prefix(base_path: &Path) -> String {
    let absolute = std::path::absolute(base_path).unwrap_or_else(|_| base_path.to_path_buf());
    let mut prefix = absolute.to_string_lossy().trim_end_matches('/').to_string();
    prefix.push('/');
    prefix
}
