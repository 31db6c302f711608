//! Composable record transforms and the `format()` chain factory.
//!
//! A [`Pipeline`] runs its [`Stage`]s in order over one record. The stages
//! here prepare the fields the Format Stage reads: a timestamp, the elapsed
//! time since the previous record, alignment padding and the colored level.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use owo_colors::OwoColorize;

use crate::compose::{strip_ansi, visible_len};
use crate::format::{DevConsoleFormat, FormatOptions};
use crate::level::Level;
use crate::record::LogRecord;

/// One transform applied to every record passing through a pipeline.
pub trait Stage: Send + Sync {
    fn transform(&self, record: &mut LogRecord);
}

/// Ordered chain of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over `record`, in order.
    pub fn apply(&self, record: &mut LogRecord) {
        for stage in &self.stages {
            stage.transform(record);
        }
    }
}

impl Stage for Pipeline {
    fn transform(&self, record: &mut LogRecord) {
        self.apply(record);
    }
}

/// Build the developer console chain for `options`.
///
/// Order: timestamp (when shown) → elapsed (when shown) → level padding →
/// level colors (when colored) → [`DevConsoleFormat`].
pub fn format(options: FormatOptions) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if options.show_timestamps {
        pipeline = pipeline.stage(Timestamp);
    }
    if options.show_elapsed {
        pipeline = pipeline.stage(Elapsed::default());
    }
    pipeline = pipeline.stage(PadLevels::default());
    if options.use_color {
        pipeline = pipeline.stage(Colorize);
    }
    pipeline.stage(DevConsoleFormat::new(options))
}

/// Stamps records that have no timestamp with the current UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamp;

impl Stage for Timestamp {
    fn transform(&self, record: &mut LogRecord) {
        if record.timestamp.is_none() {
            let now = jiff::Timestamp::now();
            record.timestamp = Some(format!("{now:.3}"));
        }
    }
}

/// Sets `ms` to the time since the previous record seen by this stage.
#[derive(Debug, Default)]
pub struct Elapsed {
    previous: Mutex<Option<Instant>>,
}

impl Stage for Elapsed {
    fn transform(&self, record: &mut LogRecord) {
        let now = Instant::now();
        let mut previous = self
            .previous
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let elapsed = previous.map_or(Duration::ZERO, |prev| now.duration_since(prev));
        *previous = Some(now);
        record.ms = Some(humanize(elapsed));
    }
}

/// `+12ms`, `+3s`, `+2m`, `+1h`, rounded to the nearest unit.
pub fn humanize(elapsed: Duration) -> String {
    const SECOND: u128 = 1_000;
    const MINUTE: u128 = 60 * SECOND;
    const HOUR: u128 = 60 * MINUTE;

    let ms = elapsed.as_millis();
    let round = |unit: u128| (ms + unit / 2) / unit;
    if ms < SECOND {
        format!("+{ms}ms")
    } else if ms < MINUTE {
        format!("+{}s", round(SECOND))
    } else if ms < HOUR {
        format!("+{}m", round(MINUTE))
    } else {
        format!("+{}h", round(HOUR))
    }
}

/// Prefixes the message with spaces so messages line up after `level:`.
///
/// Padding is `width + 1 - label_len`, measured without color codes, so every
/// known level gets at least one space.
#[derive(Debug, Clone, Copy)]
pub struct PadLevels {
    width: usize,
}

impl PadLevels {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for PadLevels {
    fn default() -> Self {
        Self::new(Level::max_label_len())
    }
}

impl Stage for PadLevels {
    fn transform(&self, record: &mut LogRecord) {
        let pad = (self.width + 1).saturating_sub(visible_len(&record.level));
        if pad > 0 {
            record.message.insert_str(0, &" ".repeat(pad));
        }
    }
}

/// Wraps recognized level labels in their color.
#[derive(Debug, Clone, Copy, Default)]
pub struct Colorize;

impl Stage for Colorize {
    fn transform(&self, record: &mut LogRecord) {
        let label = strip_ansi(&record.level).into_owned();
        if let Some(level) = Level::from_str_loose(&label) {
            record.level = label.style(level.style()).to_string();
        }
    }
}
