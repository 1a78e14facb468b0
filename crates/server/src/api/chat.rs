use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{ApiError, ErrorResponse};
use crate::state::AppState;

// ── Request/Response types ────────────────────────

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

// ── POST /v1/chat/{pdf_id} ────────────────────────

/// Ask a question about an uploaded PDF
///
/// The stored chunks of the PDF are sent to the LLM together with the
/// message; the completion is returned as-is.
#[utoipa::path(
    post,
    path = "/v1/chat/{pdf_id}",
    tag = "Chat",
    params(("pdf_id" = String, Path, description = "Identifier returned by the upload")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "LLM answer", body = ChatResponse),
        (status = 400, description = "Unknown PDF or PDF without text", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "LLM call failed", body = ErrorResponse)
    )
)]
pub async fn chat_with_pdf(
    State(state): State<Arc<AppState>>,
    Path(pdf_id): Path<String>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    info!(
        "Received chat request for PDF ID: {} with message: {}",
        pdf_id, request.message
    );

    let Some(record) = state.store.get(&pdf_id).await else {
        warn!("PDF with ID {} not found", pdf_id);
        return Err(ApiError::BadRequest("PDF is not found".into()));
    };

    if !record.has_content() {
        warn!("Failed to extract PDF content for ID: {}", pdf_id);
        return Err(ApiError::BadRequest("Failed to extract PDF content".into()));
    }

    let Some(chat) = state.chat.as_ref() else {
        error!("Chat requested for PDF ID {} but no LLM is configured", pdf_id);
        return Err(ApiError::Internal(
            "Error during chat: provider not configured: API_KEY not set".into(),
        ));
    };

    match chat.ask(&record.chunks, &request.message).await {
        Ok(response) => {
            info!("Chat response generated for PDF ID: {}", pdf_id);
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            error!("Error during chat with PDF ID {}: {}", pdf_id, e);
            Err(ApiError::Internal(format!("Error during chat: {e}")))
        }
    }
}
