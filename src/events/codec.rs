//! Decoding of webhook bodies into [`CanonicalEvent`]s.
//!
//! The encoding comes from the request's declared content type and is never
//! sniffed from the body. Both encodings decode against the same message
//! schema and fail with the same [`DecodeError`].

use prost::Message;
use serde::de::DeserializeOwned;

use super::{CanonicalEvent, EventType};

/// Content type for protobuf JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Content type for binary protobuf bodies.
pub const PROTOBUF_CONTENT_TYPE: &str = "application/octet-stream";

/// Wire encoding of a webhook body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Protobuf JSON mapping.
    StructuredText,
    /// Binary protobuf.
    CompactBinary,
}

impl Encoding {
    /// Encoding for a `Content-Type` header value.
    ///
    /// Media type parameters (`; charset=utf-8`) and case are ignored. Any
    /// media type other than the two supported ones yields `None`.
    pub fn from_content_type(content_type: &str) -> Option<Encoding> {
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
            Some(Encoding::StructuredText)
        } else if media_type.eq_ignore_ascii_case(PROTOBUF_CONTENT_TYPE) {
            Some(Encoding::CompactBinary)
        } else {
            None
        }
    }
}

/// Body could not be decoded as the requested event type.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("empty body")]
    EmptyBody,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid protobuf: {0}")]
    Protobuf(#[from] prost::DecodeError),
}

/// Decode `body` as the message registered for `event_type`.
///
/// Pure: no I/O, no logging. An empty body always fails, in either encoding.
pub fn decode(
    body: &[u8],
    event_type: EventType,
    encoding: Encoding,
) -> Result<CanonicalEvent, DecodeError> {
    if body.is_empty() {
        return Err(DecodeError::EmptyBody);
    }

    let event = match event_type {
        EventType::Up => CanonicalEvent::Up(decode_message(body, encoding)?),
        EventType::Join => CanonicalEvent::Join(decode_message(body, encoding)?),
        EventType::Ack => CanonicalEvent::Ack(decode_message(body, encoding)?),
        EventType::TxAck => CanonicalEvent::TxAck(decode_message(body, encoding)?),
        EventType::Log => CanonicalEvent::Log(decode_message(body, encoding)?),
        EventType::Status => CanonicalEvent::Status(decode_message(body, encoding)?),
        EventType::Location => CanonicalEvent::Location(decode_message(body, encoding)?),
        EventType::Integration => CanonicalEvent::Integration(decode_message(body, encoding)?),
    };

    Ok(event)
}

fn decode_message<M>(body: &[u8], encoding: Encoding) -> Result<M, DecodeError>
where
    M: Message + DeserializeOwned + Default,
{
    match encoding {
        Encoding::CompactBinary => Ok(M::decode(body)?),
        Encoding::StructuredText => {
            // Protobuf JSON messages are objects; serde would otherwise also
            // accept a struct written as an array.
            let value: serde_json::Value = serde_json::from_slice(body)?;
            match value {
                serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
                other => Err(DecodeError::NotAnObject(json_kind(&other))),
            }
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
