//! Runtime Configuration Module
//! Fixed relative paths by default, overridable with an adjacent JSON file.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Optional override file read from the working directory.
pub const CONFIG_FILE: &str = "practice-explorer.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GP practice weighted-population CSV.
    pub data_csv: PathBuf,
    /// Notes file bundled verbatim into every export.
    pub notes_txt: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from("data/2022GPdata.csv"),
            notes_txt: PathBuf::from("docs/calculations.txt"),
        }
    }
}

impl AppConfig {
    /// Read the override file if present, falling back to the defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed {CONFIG_FILE}: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
