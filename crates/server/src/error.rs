//! Error types for the Deckpress API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input-shape errors and package write faults from the core.
    #[error(transparent)]
    Conversion(#[from] deckpress_core::Error),

    /// The blocking conversion task was cancelled or panicked.
    #[error("Conversion task failed: {0}")]
    TaskJoin(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Input-shape errors are the caller's to fix.
            ApiError::Conversion(deckpress_core::Error::InvalidColorFormat(_))
            | ApiError::Conversion(deckpress_core::Error::EmptySlideList) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Conversion(deckpress_core::Error::PackageWrite(_))
            | ApiError::TaskJoin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Export failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
