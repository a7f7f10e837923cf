//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

mod export;
mod logging;
mod server;
mod storage;

pub use export::ExportConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use storage::{StorageConfig, StorageRetryConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "RECEIVER_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "RECEIVER";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "RECEIVER_LOG";
/// Environment variable selecting the per-environment config file.
pub const APP_ENV_VAR: &str = "APP_ENV";
/// Environment used when `APP_ENV` is unset.
pub const DEFAULT_APP_ENV: &str = "development";

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Message store.
    pub storage: StorageConfig,
    /// File export of accepted events.
    pub export: ExportConfig,
    /// Log filter and output format.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. `config.<APP_ENV>.yaml` in current directory (if exists)
    /// 3. File specified by `path` argument (if provided)
    /// 4. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 5. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let app_env =
            std::env::var(APP_ENV_VAR).unwrap_or_else(|_| DEFAULT_APP_ENV.to_string());

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false))
            .add_source(
                File::new(&format!("config.{}.yaml", app_env), FileFormat::Yaml).required(false),
            );

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }
}
