//! Event export interface.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::events::CanonicalEvent;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting events.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render event as JSON: {0}")]
    Render(#[from] serde_json::Error),
}

/// Best-effort mirror of accepted events.
///
/// Nothing in the ingestion path depends on an exporter succeeding; callers
/// log failures and carry on.
///
/// Implementations:
/// - `FilesystemExporter`: one JSON file per event
/// - `NoopExporter`: export disabled
#[async_trait]
pub trait EventExporter: Send + Sync {
    /// Write a snapshot of `event`. Returns the artifact location, if any.
    async fn write(&self, event: &CanonicalEvent) -> Result<Option<PathBuf>>;

    /// Remove every artifact previously written. Returns how many were removed.
    ///
    /// Artifacts that disappear while clearing are not an error.
    async fn clear_all(&self) -> Result<usize>;
}
