//! Best-effort export of accepted events.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::ExportConfig;
use crate::events::CanonicalEvent;

pub mod filesystem;

pub use crate::interfaces::exporter::{EventExporter, ExportError, Result};
pub use filesystem::FilesystemExporter;

/// Exporter used when export is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExporter;

#[async_trait]
impl EventExporter for NoopExporter {
    async fn write(&self, _event: &CanonicalEvent) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    async fn clear_all(&self) -> Result<usize> {
        Ok(0)
    }
}

/// Initialize the exporter based on configuration.
pub async fn init_exporter(config: &ExportConfig) -> Result<Arc<dyn EventExporter>> {
    if !config.enabled {
        info!("Export: disabled");
        return Ok(Arc::new(NoopExporter));
    }

    info!(output_dir = %config.output_dir.display(), "Export: filesystem");
    Ok(Arc::new(FilesystemExporter::new(&config.output_dir).await?))
}
