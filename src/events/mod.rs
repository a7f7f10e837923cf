//! Event registry and the canonical decoded event.
//!
//! The set of event types is closed: every token the receiver accepts maps to
//! exactly one [`EventType`], and every [`EventType`] to exactly one
//! integration message.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::proto::{
    AckEvent, DeviceInfo, IntegrationEvent, JoinEvent, LocationEvent, LogEvent, StatusEvent,
    TxAckEvent, UplinkEvent,
};

pub mod codec;

pub use codec::{decode, DecodeError, Encoding};

/// Event types known to the receiver, keyed by their webhook token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Up,
    Join,
    Ack,
    TxAck,
    Log,
    Status,
    Location,
    Integration,
}

impl EventType {
    /// Every supported event type, in registry order.
    pub const ALL: [EventType; 8] = [
        EventType::Up,
        EventType::Join,
        EventType::Ack,
        EventType::TxAck,
        EventType::Log,
        EventType::Status,
        EventType::Location,
        EventType::Integration,
    ];

    /// Token used on the wire and as the persistence discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Up => "up",
            EventType::Join => "join",
            EventType::Ack => "ack",
            EventType::TxAck => "txack",
            EventType::Log => "log",
            EventType::Status => "status",
            EventType::Location => "location",
            EventType::Integration => "integration",
        }
    }

    /// Look up the event type for a token. Tokens are case-sensitive.
    pub fn resolve(token: &str) -> Option<EventType> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported event type: {0}")]
pub struct UnsupportedEventType(pub String);

impl FromStr for EventType {
    type Err = UnsupportedEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| UnsupportedEventType(s.to_string()))
    }
}

/// Tokens accepted by the receiver.
pub fn supported_tokens() -> impl Iterator<Item = &'static str> {
    EventType::ALL.into_iter().map(|t| t.as_str())
}

/// A decoded integration event, independent of the wire encoding it came in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalEvent {
    Up(UplinkEvent),
    Join(JoinEvent),
    Ack(AckEvent),
    TxAck(TxAckEvent),
    Log(LogEvent),
    Status(StatusEvent),
    Location(LocationEvent),
    Integration(IntegrationEvent),
}

impl CanonicalEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            CanonicalEvent::Up(_) => EventType::Up,
            CanonicalEvent::Join(_) => EventType::Join,
            CanonicalEvent::Ack(_) => EventType::Ack,
            CanonicalEvent::TxAck(_) => EventType::TxAck,
            CanonicalEvent::Log(_) => EventType::Log,
            CanonicalEvent::Status(_) => EventType::Status,
            CanonicalEvent::Location(_) => EventType::Location,
            CanonicalEvent::Integration(_) => EventType::Integration,
        }
    }

    pub fn device_info(&self) -> Option<&DeviceInfo> {
        match self {
            CanonicalEvent::Up(e) => e.device_info.as_ref(),
            CanonicalEvent::Join(e) => e.device_info.as_ref(),
            CanonicalEvent::Ack(e) => e.device_info.as_ref(),
            CanonicalEvent::TxAck(e) => e.device_info.as_ref(),
            CanonicalEvent::Log(e) => e.device_info.as_ref(),
            CanonicalEvent::Status(e) => e.device_info.as_ref(),
            CanonicalEvent::Location(e) => e.device_info.as_ref(),
            CanonicalEvent::Integration(e) => e.device_info.as_ref(),
        }
    }

    /// Device EUI, for logging only. Empty EUIs count as absent.
    pub fn dev_eui(&self) -> Option<&str> {
        self.device_info()
            .map(|info| info.dev_eui.as_str())
            .filter(|eui| !eui.is_empty())
    }

    /// Normalized text record: compact protobuf JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented protobuf JSON, used for exported artifacts.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
