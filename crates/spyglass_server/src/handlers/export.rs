//! Export downloads.

use crate::error::ApiError;
use crate::handlers::non_blank;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};
use serde::Deserialize;
use spyglass_export::{
    DOCX_FILENAME, LandingPageFile, MARKDOWN_FILENAME, build_docx, markdown_digest,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Title used in the markdown digest when the session has no topic.
const UNTITLED: &str = "Untitled draft";

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Download the session's chapters as a `.docx` attachment.
pub async fn export_docx(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = state.session(&id)?;
    let bytes = build_docx(&session.chapters)?.into_bytes()?;
    info!(session = %id, chapters = session.chapters.len(), bytes = bytes.len(), "docx exported");

    Ok(attachment(bytes, DOCX_FILENAME, DOCX_CONTENT_TYPE))
}

/// Download the session's chapters as a markdown digest.
pub async fn export_markdown(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = state.session(&id)?;
    let title = session.topic.as_deref().unwrap_or(UNTITLED);
    let digest = markdown_digest(title, &session.chapters)?;
    info!(session = %id, chapters = session.chapters.len(), "markdown exported");

    Ok(attachment(
        digest.into_bytes(),
        MARKDOWN_FILENAME,
        "text/markdown; charset=utf-8",
    ))
}

/// Landing-page download body.
#[derive(Debug, Deserialize)]
pub struct LandingExportRequest {
    /// Landing-page HTML, passed through byte for byte.
    pub html: String,
    /// Filename override for the attachment.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Echo generated landing-page HTML back as a downloadable attachment.
pub async fn export_landing(Json(req): Json<LandingExportRequest>) -> Result<Response, ApiError> {
    non_blank(&req.html, "html")?;

    let mut file = LandingPageFile::new(req.html);
    if let Some(filename) = req.filename {
        file = file.with_filename(filename);
    }

    let filename = file.filename.clone();
    Ok(attachment(file.bytes, &filename, "text/html; charset=utf-8"))
}

fn attachment(bytes: Vec<u8>, filename: &str, content_type: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .unwrap()
}
