//! HTTP router construction.
//!
//! Assembles the routes, middleware and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::{self, doc::ApiDoc, pdf::UPLOAD_BODY_LIMIT};
use crate::middleware::with_safety_net;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            "/v1/pdf",
            post(api::upload_pdf).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/v1/chat/{pdf_id}", post(api::chat_with_pdf))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(api::not_found)
        // Registered after every route so it covers all of them.
        .method_not_allowed_fallback(api::method_not_allowed)
        .layer(CorsLayer::permissive());

    with_safety_net(app)
}
