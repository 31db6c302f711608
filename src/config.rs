//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`$XDG_CONFIG_HOME/devlog/config.toml` or `~/.config/devlog/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::error::DevlogError;
use crate::fields::FieldKeys;
use crate::format::FormatOptions;
use crate::inspect::InspectOptions;

/// Runtime configuration of the `devlog` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub color_mode: ColorMode,
    /// Formatting options; `use_color` is resolved against the terminal later.
    pub format: FormatOptions,
    pub keys: FieldKeys,
    /// Report JSON parse errors on stderr.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            format: FormatOptions::default(),
            keys: FieldKeys::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn from_cli(cli: &Cli) -> Result<Self, DevlogError> {
        let mut config = Self::default();

        match &cli.config {
            Some(path) => config.apply_file_config(FileConfig::load(path)?),
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    config.apply_file_config(FileConfig::load(&path)?);
                }
            }
        }

        config.apply_cli(cli);
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/devlog/config.toml` or `~/.config/devlog/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("devlog").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("devlog")
                .join("config.toml")
        } else {
            PathBuf::from(".config/devlog/config.toml")
        }
    }

    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = color;
        }
        if file.base_path.is_some() {
            self.format.base_path = file.base_path;
        }
        if let Some(show) = file.show_timestamps {
            self.format.show_timestamps = show;
        }
        if let Some(separate) = file.add_line_separation {
            self.format.add_line_separation = separate;
        }
        if let Some(inspect) = file.inspect {
            self.format.inspect_options = inspect;
        }
        if let Some(keys) = file.keys {
            self.keys = keys;
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(color) = cli.color {
            self.color_mode = color;
        }
        if cli.base_path.is_some() {
            self.format.base_path.clone_from(&cli.base_path);
        }
        if cli.timestamps {
            self.format.show_timestamps = true;
        }
        if cli.no_line_separation {
            self.format.add_line_separation = false;
        }
        if cli.depth.is_some() {
            self.format.inspect_options.depth = cli.depth;
        }
        if cli.compact {
            self.format.inspect_options.compact = true;
        }
        if cli.message_key.is_some() {
            self.keys.message.clone_from(&cli.message_key);
        }
        if cli.level_key.is_some() {
            self.keys.level.clone_from(&cli.level_key);
        }
        if cli.timestamp_key.is_some() {
            self.keys.timestamp.clone_from(&cli.timestamp_key);
        }
        self.verbose = cli.verbose;
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<ColorMode>,
    base_path: Option<PathBuf>,
    show_timestamps: Option<bool>,
    add_line_separation: Option<bool>,
    inspect: Option<InspectOptions>,
    keys: Option<FieldKeys>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, DevlogError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DevlogError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }
}
