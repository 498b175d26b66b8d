//! Request handlers.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use deckpress_core::PresentationSpec;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Liveness probe.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Backend ready for PPTX export" }))
}

/// Secondary liveness probe kept for client compatibility.
pub async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello from the backend API!" }))
}

/// Convert a deck specification into a downloadable PPTX package.
pub async fn export_pptx(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<PresentationSpec>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = spec.filename.clone();
    let fetcher = state.fetcher.clone();

    // Rendering fetches images over a blocking client; keep it off the
    // async runtime.
    let bytes = tokio::task::spawn_blocking(move || deckpress_pptx::assemble(&spec, &fetcher))
        .await
        .map_err(|e| ApiError::TaskJoin(e.to_string()))??;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(PPTX_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&filename),
    );

    Ok((headers, bytes))
}

/// Attachment disposition for the suggested filename. Characters that
/// cannot appear in a header value are dropped rather than failing the
/// whole download.
fn content_disposition(filename: &str) -> HeaderValue {
    let sanitized: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .filter(|c| *c != '"')
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", sanitized))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
