//! Outer request wrapper: request logging plus a panic safety net.

use std::any::Any;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

use crate::api::ErrorResponse;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Log every request on the way in, and its status and latency on the way out.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    info!("Processing request: {} {}", method, uri);

    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Completed request: {} {}",
        method,
        uri,
    );
    response
}

/// Turn a handler panic into a generic 500. The panic payload is logged, never returned.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    error!("An error occurred: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            detail: UNEXPECTED_ERROR.into(),
        }),
    )
        .into_response()
}

/// Wrap every route of `router` with request logging and panic recovery.
/// Panic recovery is outermost so it also covers the logging layer.
pub fn with_safety_net(router: Router) -> Router {
    router
        .layer(middleware::from_fn(log_requests))
        .layer(CatchPanicLayer::custom(handle_panic))
}
