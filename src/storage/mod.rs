//! Storage implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::StorageConfig;

pub mod mock;
pub mod schema;
pub mod sqlite;

pub use crate::interfaces::message_store::{MessageStore, Result, StorageError, StoredMessage};
pub use mock::MockMessageStore;
pub use sqlite::SqliteMessageStore;

/// Open the SQLite database described by `config` and ensure its schema.
///
/// Parent directories of the database file are created as needed.
pub async fn init_storage(config: &StorageConfig) -> Result<Arc<SqliteMessageStore>> {
    info!(path = %config.path, "Storage: sqlite");

    if let Some(parent) = Path::new(&config.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let opts = SqliteConnectOptions::new()
        .filename(&config.path)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(opts)
        .await?;

    let store = Arc::new(SqliteMessageStore::with_retry(
        pool,
        config.retry.policy(),
    ));
    store.init().await?;

    if !store.check_table_exists("messages").await? {
        warn!("messages table missing after schema init");
        return Err(StorageError::Unavailable(
            "messages table could not be created".to_string(),
        ));
    }

    Ok(store)
}
