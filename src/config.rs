// SPDX-License-Identifier: MIT
//
// Configuration — TOML in the platform config directory.
//
//   Linux   ~/.config/n-pick/config.toml
//   macOS   ~/Library/Application Support/n-pick/config.toml
//
// Every field has a default. A missing file is not an error, and neither is
// a broken one: the picker starts with defaults and logs why.

use std::path::{Path, PathBuf};

use n_color::Rgb;
use n_term::event_loop::LoopConfig;
use serde::Deserialize;

use crate::error::{PickError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Starting color, anything `n_color::parse` accepts. Default: "#FF0000".
    #[serde(default = "default_color")]
    pub color: String,

    /// Copy through OSC 52. Off keeps copies inside the picker.
    #[serde(default = "default_true")]
    pub clipboard: bool,

    /// Event loop tick in microseconds. Default: 8333 (120 Hz).
    #[serde(default = "default_tick_interval_us")]
    pub tick_interval_us: u64,
}

fn default_color() -> String {
    "#FF0000".into()
}

const fn default_true() -> bool {
    true
}

const fn default_tick_interval_us() -> u64 {
    LoopConfig::DEFAULT_TICK_US
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: default_color(),
            clipboard: true,
            tick_interval_us: default_tick_interval_us(),
        }
    }
}

impl Config {
    /// Platform config directory for n-pick.
    #[must_use]
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("n-pick"))
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Where the log goes unless `--log-file` says otherwise.
    #[must_use]
    pub fn log_path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("n-pick.log"))
    }

    /// Load from `path`, returning the config and any warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist and
    /// `(defaults, [warning])` if it exists but can't be parsed.
    #[must_use]
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return (Self::default(), vec![]);
        };
        match toml::from_str::<Self>(&contents) {
            Ok(config) => {
                let mut warnings = vec![];
                let config = config.sanitized(&mut warnings);
                (config, warnings)
            }
            Err(e) => {
                let warning = format!(
                    "config parse error ({}), using defaults: {e}",
                    path.display()
                );
                (Self::default(), vec![warning])
            }
        }
    }

    /// Load from `path` (or the platform path) and log any warnings.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let default_path = Self::path();
        let Some(path) = path.or(default_path.as_deref()) else {
            log::debug!("no config directory, using defaults");
            return Self::default();
        };
        let (config, warnings) = Self::load_from(path);
        for w in &warnings {
            log::warn!("{w}");
        }
        log::debug!("config from {}: {config:?}", path.display());
        config
    }

    /// The starting color.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Color`] if `color` does not parse.
    pub fn initial_color(&self) -> Result<Rgb> {
        Ok(n_color::parse(&self.color)?)
    }

    /// Loop timing derived from the config.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Config`] for a zero tick.
    pub fn loop_config(&self) -> Result<LoopConfig> {
        if self.tick_interval_us == 0 {
            return Err(PickError::Config("tick_interval_us must be positive".into()));
        }
        Ok(LoopConfig {
            tick_interval_us: self.tick_interval_us,
        })
    }

    /// Replace values that would stop the picker from starting.
    fn sanitized(mut self, warnings: &mut Vec<String>) -> Self {
        if self.tick_interval_us == 0 {
            warnings.push(format!(
                "tick_interval_us = 0 is invalid, using {}",
                default_tick_interval_us()
            ));
            self.tick_interval_us = default_tick_interval_us();
        }
        self
    }
}
