//! `tracing` events rendered by `DevConsoleLayer`.
//!
//! Run with `cargo run --example tracing_layer`.

use devlog::{FormatOptions, init_tracing};

#[derive(Debug)]
struct GarageError(std::io::Error);

impl std::fmt::Display for GarageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("garage door stuck")
    }
}

impl std::error::Error for GarageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

fn main() {
    if !init_tracing(FormatOptions {
        show_timestamps: true,
        ..FormatOptions::default()
    }) {
        eprintln!("a global subscriber is already installed");
        return;
    }

    tracing::info!("Logging initialized");
    tracing::debug!(make = "Ford", model = "Mustang", year = 1969, "Debug an object");
    tracing::warn!("Warning");

    let err = GarageError(std::io::Error::other("motor overheated"));
    tracing::error!(error = &err as &(dyn std::error::Error + 'static), "Unexpected error");
}
