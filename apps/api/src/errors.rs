use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Every failure that reaches a caller is one of these kinds; unclassified
/// failures are folded into `Internal` by [`AppError::classify`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("AI service configuration is missing")]
    Configuration,

    #[error("Not authorized to access AI service")]
    Unauthorized,

    #[error("AI service endpoint not found")]
    NotFound,

    #[error("AI service encountered an error")]
    UpstreamFailure { status: u16 },

    #[error("AI service call failed: {0}")]
    BadUpstreamRequest(String),

    #[error("Failed to parse PDF")]
    Extraction(#[source] anyhow::Error),

    #[error("Failed to {context}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Maps a non-success status from the generation service.
    pub fn from_upstream_status(status: u16, status_text: &str) -> Self {
        match status {
            401 | 403 => AppError::Unauthorized,
            404 => AppError::NotFound,
            s if s >= 500 => AppError::UpstreamFailure { status: s },
            _ => AppError::BadUpstreamRequest(status_text.to_string()),
        }
    }

    /// Returns an already-classified error unchanged; anything else is logged
    /// and wrapped as `Internal` with the given context.
    pub fn classify(err: anyhow::Error, context: &'static str) -> Self {
        match err.downcast::<AppError>() {
            Ok(classified) => classified,
            Err(source) => {
                tracing::error!("Error during {context}: {source:?}");
                AppError::Internal { context, source }
            }
        }
    }

    /// Stable code surfaced to RPC callers.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::BadUpstreamRequest(_) => "BAD_REQUEST",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Configuration
            | AppError::UpstreamFailure { .. }
            | AppError::Extraction(_)
            | AppError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadUpstreamRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Configuration
            | AppError::UpstreamFailure { .. }
            | AppError::Extraction(_)
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::Validation(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Configuration => tracing::error!("AI service configuration is missing"),
            AppError::UpstreamFailure { status } => {
                tracing::error!("AI service returned status {status}")
            }
            AppError::Extraction(e) => tracing::error!("Extraction error: {e:?}"),
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (self.status(), body).into_response()
    }
}
