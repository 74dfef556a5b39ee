//! API error responses.
//!
//! Every handler failure is funneled into [`ApiError`], which renders as a
//! `{ "error": … }` JSON body with a status code matched to the failure:
//! client mistakes map to 4xx, upstream provider trouble to 502/503, and
//! anything unexplained to 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use spyglass_error::{
    ExportErrorKind, GeminiErrorKind, ScrapeErrorKind, ServerErrorKind, SpeechErrorKind,
    SpyglassError, SpyglassErrorKind, StudioErrorKind,
};

/// JSON body sent for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of what went wrong.
    pub error: String,
}

/// API error with an HTTP status already decided.
#[derive(Debug)]
pub enum ApiError {
    /// Request is malformed or missing required input (400).
    BadRequest(String),
    /// Referenced resource does not exist (404).
    NotFound(String),
    /// Request is well-formed but cannot be acted on yet (422).
    Unprocessable(String),
    /// An upstream provider failed or returned an unusable reply (502).
    BadGateway(String),
    /// A required backend is not configured (503).
    ServiceUnavailable(String),
    /// Anything else (500).
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message().to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<SpyglassError> for ApiError {
    fn from(err: SpyglassError) -> Self {
        let message = err.to_string();
        match err.kind() {
            SpyglassErrorKind::Server(e) => match &e.kind {
                ServerErrorKind::SessionNotFound(_) => ApiError::NotFound(message),
                ServerErrorKind::InvalidRequest(_) => ApiError::BadRequest(message),
                ServerErrorKind::Bind { .. } | ServerErrorKind::Serve(_) => {
                    ApiError::Internal(message)
                }
            },
            SpyglassErrorKind::Studio(e) => match &e.kind {
                StudioErrorKind::MissingTopic(_) => ApiError::Unprocessable(message),
                // The model replied but the reply was unusable.
                StudioErrorKind::BriefExtraction(_) | StudioErrorKind::EmptyGeneration(_) => {
                    ApiError::BadGateway(message)
                }
            },
            SpyglassErrorKind::Gemini(e) => match &e.kind {
                GeminiErrorKind::MissingApiKey | GeminiErrorKind::ClientCreation(_) => {
                    ApiError::Internal(message)
                }
                _ => ApiError::BadGateway(message),
            },
            SpyglassErrorKind::Scrape(e) => match &e.kind {
                ScrapeErrorKind::EmptyKeyword => ApiError::BadRequest(message),
                ScrapeErrorKind::MissingToken => ApiError::ServiceUnavailable(message),
                _ => ApiError::BadGateway(message),
            },
            SpyglassErrorKind::Speech(e) => match &e.kind {
                SpeechErrorKind::EmptyText => ApiError::BadRequest(message),
                _ => ApiError::BadGateway(message),
            },
            SpyglassErrorKind::Export(e) => match &e.kind {
                ExportErrorKind::NoChapters => ApiError::BadRequest(message),
                _ => ApiError::Internal(message),
            },
            _ => ApiError::Internal(message),
        }
    }
}
