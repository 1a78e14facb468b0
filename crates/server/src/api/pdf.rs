use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use pdfchat_ingest::document::chunker::{chunk_text, ChunkConfig};
use pdfchat_ingest::document::{is_pdf_filename, ExtractionError};

use super::{ApiError, ErrorResponse};
use crate::state::{AppState, PdfExtractor};

/// Largest accepted upload, in bytes.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Request body limit for the upload route. Slightly above [`MAX_FILE_SIZE`]
/// so the multipart framing around a 10 MiB file still fits.
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 1024 * 1024;

const FILE_FIELD: &str = "file";

const INVALID_TYPE: &str = "Invalid file type. Only PDF files are accepted.";
const TOO_LARGE: &str = "File size is too large. Only 10 MB or less files are accepted.";

// ── Request/Response types ────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub pdf_id: String,
}

// ── POST /v1/pdf ──────────────────────────────────

/// Upload a PDF
///
/// Accepts multipart/form-data with a `file` field. The PDF text is
/// extracted, chunked and kept in memory under the returned id.
#[utoipa::path(
    post,
    path = "/v1/pdf",
    tag = "PDF",
    request_body(content_type = "multipart/form-data", description = "PDF file in the `file` field"),
    responses(
        (status = 200, description = "PDF stored", body = UploadResponse),
        (status = 400, description = "Missing file, wrong type or too large", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::BadRequest(format!("Invalid multipart request: {e}")))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        info!("Received file upload request for file: {}", filename);

        if !is_pdf_filename(&filename) {
            warn!("Invalid file type: {}", filename);
            return Err(ApiError::BadRequest(INVALID_TYPE.into()));
        }

        let bytes = field.bytes().await.map_err(read_error)?;
        upload = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::BadRequest("No file provided".into()));
    };

    if bytes.len() > MAX_FILE_SIZE {
        warn!("File size too large: {} bytes", bytes.len());
        return Err(ApiError::BadRequest(TOO_LARGE.into()));
    }

    debug!("Processing PDF '{}' ({} bytes)", filename, bytes.len());
    let chunk_config = state.chunk_config.clone();
    let extractor = state.extractor;
    let (page_count, chunks) =
        tokio::task::spawn_blocking(move || process_pdf(extractor, &bytes, &chunk_config))
            .await
            .map_err(|e| {
                error!("PDF processing task failed: {e}");
                ApiError::Internal(format!("Error during processing file: {e}"))
            })?
            .map_err(|e| {
                error!("Error during PDF processing: {e}");
                ApiError::Internal(format!("Error during processing file: {e}"))
            })?;

    let record = state.store.insert_new(filename, page_count, chunks).await;
    info!(
        "PDF processed successfully. PDF ID: {} ({} pages, {} chunks)",
        record.id,
        record.page_count,
        record.chunks.len(),
    );

    Ok(Json(UploadResponse {
        pdf_id: record.id.clone(),
    }))
}

/// Extract and chunk a PDF. Returns the page count and chunk texts.
fn process_pdf(
    extractor: PdfExtractor,
    bytes: &[u8],
    chunk_config: &ChunkConfig,
) -> Result<(usize, Vec<String>), ExtractionError> {
    let doc = extractor(bytes)?;
    let chunks = chunk_text(&doc.full_text(), chunk_config)
        .into_iter()
        .map(|c| c.content)
        .collect();
    Ok((doc.page_count(), chunks))
}

/// A body-limit failure while streaming the upload is reported as an
/// oversized file; anything else is a malformed request.
fn read_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("File size too large: upload exceeded the body limit");
        ApiError::BadRequest(TOO_LARGE.into())
    } else {
        ApiError::BadRequest(format!("Failed to read upload: {}", e.body_text()))
    }
}
