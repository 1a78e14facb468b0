//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers and `ToSchema` types
//! into one OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pdfchat API",
        version = "0.1.0",
        description = "Upload a PDF, then ask questions about its text through Google Gemini.",
    ),
    tags(
        (name = "Health", description = "Server liveness"),
        (name = "PDF", description = "PDF upload, text extraction and chunking"),
        (name = "Chat", description = "Questions about an uploaded PDF"),
    ),
    paths(
        crate::api::health::health,
        crate::api::pdf::upload_pdf,
        crate::api::chat::chat_with_pdf,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::pdf::UploadResponse,
        crate::api::chat::ChatRequest,
        crate::api::chat::ChatResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/v1/pdf"));
        assert!(paths.iter().any(|p| *p == "/v1/chat/{pdf_id}"));
        assert!(paths.iter().any(|p| *p == "/health"));
    }
}
