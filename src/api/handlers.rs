//! Route handlers.

use std::num::{IntErrorKind, NonZeroU32};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use super::errmsg;
use crate::dispatcher::{Dispatcher, MessageView};
use crate::events::Encoding;

/// Number of messages returned when `n` is absent or not an integer.
pub const DEFAULT_LAST_MESSAGES: u32 = 5;

#[derive(Debug, Default, Deserialize)]
pub struct EventParams {
    event: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastMessagesParams {
    n: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearParams {
    confirm: Option<String>,
}

/// `POST /event?event=<token>`
pub async fn post_event(
    State(dispatcher): State<Dispatcher>,
    Query(params): Query<EventParams>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let Some(token) = params.event.filter(|t| !t.is_empty()) else {
        return bad_request(errmsg::MISSING_EVENT_PARAM);
    };

    if body.is_empty() {
        return bad_request(errmsg::MISSING_BODY);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let Some(encoding) = Encoding::from_content_type(content_type) else {
        debug!(%content_type, "rejected content type");
        return bad_request(errmsg::INVALID_CONTENT_TYPE);
    };

    let outcome = dispatcher.handle(&token, &body, encoding).await;
    (outcome.status, outcome.message)
}

/// `GET /last-messages?n=<n>`
pub async fn last_messages(
    State(dispatcher): State<Dispatcher>,
    Query(params): Query<LastMessagesParams>,
) -> Result<Json<Vec<MessageView>>, (StatusCode, String)> {
    let n = parse_limit(params.n.as_deref()).ok_or_else(|| bad_request(errmsg::INVALID_N_PARAM))?;
    Ok(Json(dispatcher.last_messages(n).await))
}

/// `POST /clear?confirm=true`
pub async fn clear(
    State(dispatcher): State<Dispatcher>,
    Query(params): Query<ClearParams>,
) -> (StatusCode, String) {
    let confirmed = params
        .confirm
        .is_some_and(|c| c.eq_ignore_ascii_case("true"));
    if !confirmed {
        return bad_request(errmsg::CONFIRMATION_REQUIRED);
    }

    match dispatcher.clear_all().await {
        Ok(_) => (StatusCode::OK, errmsg::MESSAGES_CLEARED.to_string()),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            errmsg::CLEAR_FAILED.to_string(),
        ),
    }
}

/// `GET /health`
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, errmsg::HEALTHY)
}

fn bad_request(message: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.to_string())
}

/// Resolve the `n` query value.
///
/// Absent or non-integer values fall back to the default; integers below 1
/// are rejected, however far below. Values past `u32::MAX` are clamped.
pub fn parse_limit(raw: Option<&str>) -> Option<NonZeroU32> {
    let n = match raw.map(|s| s.trim().parse::<i64>()) {
        None => i64::from(DEFAULT_LAST_MESSAGES),
        Some(Ok(n)) => n,
        Some(Err(e)) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => return None,
            _ => i64::from(DEFAULT_LAST_MESSAGES),
        },
    };
    let n = u32::try_from(n.min(i64::from(u32::MAX))).ok()?;
    NonZeroU32::new(n)
}
