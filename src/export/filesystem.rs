//! Filesystem-based event export.
//!
//! Each accepted event is written as one pretty-printed JSON file:
//! ```text
//! {output_dir}/
//!   {event_type}_{YYYYmmdd_HHMMSS}.json
//! ```
//!
//! Timestamps are local time with second precision, so two events of the
//! same type in the same second share a name and the later one wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::fs;
use tracing::{debug, warn};

use super::{EventExporter, Result};
use crate::events::{CanonicalEvent, EventType};

const EXPORT_EXTENSION: &str = "json";

/// Writes each event to its own JSON file under a directory.
pub struct FilesystemExporter {
    output_dir: PathBuf,
    temp_counter: AtomicU64,
}

impl FilesystemExporter {
    /// Create a new filesystem exporter.
    ///
    /// Creates the output directory if it doesn't exist.
    pub async fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).await?;
        Ok(Self {
            output_dir,
            temp_counter: AtomicU64::new(0),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Artifact path for an event of `event_type` exported at `at`.
    pub fn path_for(&self, event_type: EventType, at: DateTime<Local>) -> PathBuf {
        self.output_dir.join(file_name(event_type, at))
    }

    /// Write `event` as if exported at `at`. A failed write leaves no temp file.
    pub(crate) async fn write_at(
        &self,
        event: &CanonicalEvent,
        at: DateTime<Local>,
    ) -> Result<PathBuf> {
        let rendered = event.to_json_pretty()?;
        let path = self.path_for(event.event_type(), at);

        // Write atomically using temp file + rename
        let seq = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        let temp_path = path.with_extension(format!("{}.tmp", seq));
        let written = match fs::write(&temp_path, rendered.as_bytes()).await {
            Ok(()) => fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), "Exported event");
        Ok(path)
    }
}

/// `<token>_<YYYYmmdd_HHMMSS>.json`
pub fn file_name(event_type: EventType, at: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        event_type,
        at.format("%Y%m%d_%H%M%S"),
        EXPORT_EXTENSION
    )
}

#[async_trait]
impl EventExporter for FilesystemExporter {
    async fn write(&self, event: &CanonicalEvent) -> Result<Option<PathBuf>> {
        self.write_at(event, Local::now()).await.map(Some)
    }

    async fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;

        let mut entries = match fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != EXPORT_EXTENSION) || path.is_dir() {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to delete exported event"
                    );
                    return Err(e.into());
                }
            }
        }

        Ok(removed)
    }
}
