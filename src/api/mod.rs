//! HTTP boundary for the webhook receiver.
//!
//! Routes:
//! - `POST /event?event=<token>`: deliver one integration event
//! - `GET /last-messages?n=<n>`: most recent stored events
//! - `POST /clear?confirm=true`: delete stored and exported events
//! - `GET /health`: liveness probe

use std::any::Any;
use std::future::Future;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::dispatcher::Dispatcher;

pub mod errmsg;
pub mod handlers;

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve(
    dispatcher: Dispatcher,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "webhook receiver listening");
    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Build the axum router (separated for testing).
pub fn router(dispatcher: Dispatcher) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/event", post(handlers::post_event))
        .route("/last-messages", get(handlers::last_messages))
        .route("/clear", post(handlers::clear))
        .route("/health", get(handlers::health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(dispatcher)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, errmsg::UNEXPECTED_ERROR).into_response()
}
