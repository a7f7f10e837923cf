//! chirpstack-receiver: webhook receiver for ChirpStack integration events.
//!
//! ## Configuration
//! - `config.yaml`, `config.<APP_ENV>.yaml`, `--config <path>`, RECEIVER_CONFIG
//! - RECEIVER__* environment overrides (e.g. RECEIVER__SERVER__PORT=8080)
//! - RECEIVER_LOG: tracing filter (default: `logging.level`)

use std::sync::Arc;

use tracing::{error, info};

use chirpstack_receiver::api;
use chirpstack_receiver::config::Config;
use chirpstack_receiver::dispatcher::Dispatcher;
use chirpstack_receiver::export::init_exporter;
use chirpstack_receiver::interfaces::MessageStore;
use chirpstack_receiver::storage::init_storage;
use chirpstack_receiver::utils::bootstrap::{init_tracing, parse_config_path, shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let config = Config::load(config_path.as_deref());

    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting chirpstack-receiver"
    );

    let store: Arc<dyn MessageStore> = init_storage(&config.storage).await.map_err(|e| {
        error!(error = %e, "failed to initialize storage");
        e
    })?;

    let exporter = init_exporter(&config.export).await.map_err(|e| {
        error!(error = %e, "failed to initialize exporter");
        e
    })?;

    let dispatcher = Dispatcher::new(store, exporter);

    api::serve(dispatcher, &config.server.bind_addr(), shutdown_signal()).await?;

    info!("chirpstack-receiver stopped");
    Ok(())
}
