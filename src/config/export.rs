//! File export configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Mirror each accepted event to a JSON file.
    pub enabled: bool,
    /// Directory for exported files. Created if absent.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("./data/json/"),
        }
    }
}
