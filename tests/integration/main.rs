//! CLI integration tests for the `devlog` binary.

mod basic_pipe;
mod color_control;
mod config_custom;
mod embedded_json;
mod mixed_input;
