//! Abstract interfaces for receiver components.
//!
//! These traits define the contracts for:
//! - Message storage (durable persistence of accepted events)
//! - Event export (best-effort mirror of accepted events)

pub mod exporter;
pub mod message_store;

pub use exporter::{EventExporter, ExportError};
pub use message_store::{MessageStore, StorageError, StoredMessage};
