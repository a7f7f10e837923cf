//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Messages table schema.
#[derive(Iden)]
pub enum Messages {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "event_type"]
    EventType,
    #[iden = "payload"]
    Payload,
    #[iden = "received_at"]
    ReceivedAt,
}

/// SQL for creating the messages table.
///
/// `received_at` is assigned by the engine as a millisecond UTC RFC 3339
/// string, so text order is chronological order.
pub const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_type TEXT NOT NULL,
    payload TEXT,
    received_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL for the recency index used by `recent`.
pub const CREATE_MESSAGES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_messages_received_at ON messages(received_at, id)";
