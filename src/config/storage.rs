//! Storage configuration types.

use std::time::Duration;

use serde::Deserialize;

use crate::utils::retry::RetryConfig;

/// SQLite message store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. Parent directories are created on startup.
    pub path: String,
    /// Connection pool size.
    pub max_connections: u32,
    /// How long SQLite itself waits on a lock before reporting busy.
    ///
    /// Zero hands all contention to the retry policy below.
    pub busy_timeout_ms: u64,
    /// Retry policy for locked/busy conditions.
    pub retry: StorageRetryConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "events.sqlite".to_string(),
            max_connections: 4,
            busy_timeout_ms: 0,
            retry: StorageRetryConfig::default(),
        }
    }
}

/// Lock-retry settings as written in configuration files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageRetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Fixed delay between retries, in milliseconds.
    pub delay_ms: u64,
}

impl Default for StorageRetryConfig {
    fn default() -> Self {
        let policy = RetryConfig::default();
        Self {
            max_retries: policy.max_retries,
            delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

impl StorageRetryConfig {
    pub fn policy(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}
