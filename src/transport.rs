//! Console transport: a [`Pipeline`] bound to an output stream.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::DevlogError;
use crate::format::FormatOptions;
use crate::pipeline::{self, Pipeline};
use crate::record::LogRecord;

/// Build a console transport writing the developer format to stdout.
pub fn transport(options: FormatOptions) -> ConsoleTransport {
    ConsoleTransport::new(pipeline::format(options), io::stdout())
}

/// Runs records through a pipeline and writes the rendered text, one record
/// per write, followed by a newline.
pub struct ConsoleTransport {
    pipeline: Pipeline,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleTransport {
    pub fn new(pipeline: Pipeline, writer: impl Write + Send + 'static) -> Self {
        Self {
            pipeline,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Developer format for `options`, written to `writer`.
    pub fn with_writer(options: FormatOptions, writer: impl Write + Send + 'static) -> Self {
        Self::new(pipeline::format(options), writer)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Format `record` and write it.
    pub fn log(&self, mut record: LogRecord) -> Result<(), DevlogError> {
        self.pipeline.apply(&mut record);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(writer, "{}", record.rendered)?;
        writer.flush()?;
        Ok(())
    }
}
