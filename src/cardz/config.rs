//! # Configuration
//!
//! Settings live in `config.json` next to the data files. Missing keys fall
//! back to their defaults, so an empty or partial file is valid.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `shuffle` | `true` | Shuffle the deck when a study session starts |
//! | `preview_width` | `100` | Column width for list output |

use crate::error::{CardzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PREVIEW_WIDTH: usize = 100;
const MIN_PREVIEW_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardzConfig {
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,

    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

fn default_shuffle() -> bool {
    true
}

fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

impl Default for CardzConfig {
    fn default() -> Self {
        Self {
            shuffle: default_shuffle(),
            preview_width: default_preview_width(),
        }
    }
}

/// Keys accepted by `cardz config`.
pub const KEYS: &[&str] = &["shuffle", "preview_width"];

impl CardzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CardzError::Io)?;
        let config: CardzConfig =
            serde_json::from_str(&content).map_err(CardzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CardzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CardzError::Serialization)?;
        fs::write(config_path, content).map_err(CardzError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "shuffle" => Some(self.shuffle.to_string()),
            "preview_width" => Some(self.preview_width.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "shuffle" => {
                self.shuffle = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    other => {
                        return Err(CardzError::Api(format!(
                            "shuffle expects true or false, got \"{}\"",
                            other
                        )))
                    }
                };
            }
            "preview_width" => {
                let width: usize = value.parse().map_err(|_| {
                    CardzError::Api(format!("preview_width expects a number, got \"{}\"", value))
                })?;
                self.preview_width = width.max(MIN_PREVIEW_WIDTH);
            }
            other => return Err(CardzError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
