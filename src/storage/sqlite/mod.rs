//! SQLite implementation of the message store.

mod message_store;

pub use message_store::SqliteMessageStore;
