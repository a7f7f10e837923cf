//! Dispatch of webhook deliveries: decode, persist, export.
//!
//! The dispatcher is the only component that sees both the durable store and
//! the exporter. It turns every internal failure into a `(status, message)`
//! outcome for the HTTP boundary; nothing it does can fail a request after
//! the body has decoded.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::SecondsFormat;
use http::StatusCode;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::events::{decode, CanonicalEvent, Encoding, EventType, UnsupportedEventType};
use crate::interfaces::{EventExporter, MessageStore, StorageError, StoredMessage};

/// Generic message for failures whose detail must not reach the caller.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Boundary-facing result of handling one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub message: String,
}

impl Outcome {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// A stored message as returned to readers, with its payload parsed back
/// into structured form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub event_type: String,
    pub payload: serde_json::Value,
    pub received_at: String,
}

impl MessageView {
    fn from_stored(message: StoredMessage) -> Result<Self, serde_json::Error> {
        Ok(Self {
            payload: serde_json::from_str(&message.payload)?,
            received_at: message
                .received_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            event_type: message.event_type,
        })
    }
}

/// What `clear_all` removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleared {
    pub messages: u64,
    pub exports: usize,
}

/// Routes decoded events to the message store and the exporter.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn MessageStore>,
    exporter: Arc<dyn EventExporter>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn MessageStore>, exporter: Arc<dyn EventExporter>) -> Self {
        Self { store, exporter }
    }

    /// Handle one webhook delivery of event type `token`.
    ///
    /// Unknown tokens and undecodable bodies are client errors. Once the body
    /// decodes, the outcome is success: persistence and export failures are
    /// logged but do not change the response.
    pub async fn handle(&self, token: &str, body: &[u8], encoding: Encoding) -> Outcome {
        let Some(event_type) = EventType::resolve(token) else {
            debug!(event_type = %token, "unsupported event type");
            return Outcome::new(
                StatusCode::BAD_REQUEST,
                UnsupportedEventType(token.to_string()).to_string(),
            );
        };

        let event = match decode(body, event_type, encoding) {
            Ok(event) => event,
            Err(e) => {
                debug!(%event_type, error = %e, "failed to decode event");
                return Outcome::new(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to parse {} event: {}", event_type, e),
                );
            }
        };

        log_received(&event);

        let normalized = match event.to_json() {
            Ok(normalized) => normalized,
            Err(e) => {
                error!(%event_type, error = %e, "failed to render event as JSON");
                return Outcome::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR);
            }
        };

        // Independent consumers: neither result affects the other or the response.
        let (stored, exported) = tokio::join!(
            self.store.append(event_type.as_str(), &normalized),
            self.exporter.write(&event)
        );

        match stored {
            Ok(id) => debug!(%event_type, id, "event persisted"),
            Err(e) => error!(%event_type, error = %e, "failed to persist event"),
        }
        match exported {
            Ok(Some(path)) => debug!(%event_type, path = %path.display(), "event exported"),
            Ok(None) => {}
            Err(e) => warn!(%event_type, error = %e, "failed to export event"),
        }

        Outcome::new(StatusCode::OK, format!("{} event processed", event_type))
    }

    /// Up to `n` most recently received messages, newest first.
    ///
    /// Read failures are logged and yield an empty list.
    pub async fn last_messages(&self, n: NonZeroU32) -> Vec<MessageView> {
        let stored = match self.store.recent(n).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, "failed to read recent messages");
                return Vec::new();
            }
        };

        match stored
            .into_iter()
            .map(MessageView::from_stored)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(views) => views,
            Err(e) => {
                error!(error = %e, "stored payload is not valid JSON");
                Vec::new()
            }
        }
    }

    /// Delete every stored message, then every exported artifact.
    ///
    /// Only a store failure is reported; export cleanup is best effort.
    pub async fn clear_all(&self) -> Result<Cleared, StorageError> {
        let messages = self.store.clear_all().await.map_err(|e| {
            error!(error = %e, "failed to clear messages");
            e
        })?;

        let exports = match self.exporter.clear_all().await {
            Ok(exports) => exports,
            Err(e) => {
                warn!(error = %e, "failed to clear exported events");
                0
            }
        };

        info!(messages, exports, "all messages cleared");
        Ok(Cleared { messages, exports })
    }
}

fn log_received(event: &CanonicalEvent) {
    let dev_eui = event.dev_eui().unwrap_or("unknown");
    match event {
        CanonicalEvent::Up(up) => info!(
            event_type = "up",
            dev_eui,
            f_port = up.f_port,
            data = %hex::encode(&up.data),
            "uplink received"
        ),
        CanonicalEvent::Join(join) => info!(
            event_type = "join",
            dev_eui,
            dev_addr = %join.dev_addr,
            "join received"
        ),
        other => info!(event_type = %other.event_type(), dev_eui, "event received"),
    }
}
