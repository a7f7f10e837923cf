//! Message storage interface.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid timestamp '{value}' in row {id}: {source}")]
    InvalidTimestamp {
        id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database is locked")]
    Locked,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A persisted event record.
///
/// Created once per accepted event and never updated. `id` is assigned by the
/// store and strictly increases in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub id: i64,
    pub event_type: String,
    /// Normalized protobuf JSON of the event.
    pub payload: String,
    pub received_at: DateTime<Utc>,
}

/// Interface for message persistence.
///
/// Each operation is atomic on its own; no session state is held between
/// calls. Implementations:
/// - `SqliteMessageStore`: SQLite storage with lock-retry
/// - `MockMessageStore`: in-memory storage for tests
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Ensure the schema exists. Idempotent and safe to call at any time.
    async fn init(&self) -> Result<()>;

    /// Append one message and return its id.
    ///
    /// The receive timestamp is assigned by the store.
    async fn append(&self, event_type: &str, payload: &str) -> Result<i64>;

    /// Up to `limit` messages, most recently received first.
    ///
    /// Ties on `received_at` are broken by descending id.
    async fn recent(&self, limit: NonZeroU32) -> Result<Vec<StoredMessage>>;

    /// Delete every message. Returns the number of rows removed.
    async fn clear_all(&self) -> Result<u64>;
}
