//! Text-to-speech synthesis.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

fn default_language() -> String {
    "en".to_string()
}

/// Synthesis inputs.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Text to read aloud.
    pub text: String,
    /// Language code such as `"en"` or `"es"`.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Synthesize speech and return the audio bytes directly.
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeechRequest>,
) -> Result<Response, ApiError> {
    let audio = state.speech.synthesize(&req.text, &req.language).await?;
    info!(language = %req.language, bytes = audio.len(), "speech synthesized");

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_LENGTH, audio.len())
        .body(Body::from(audio))
        .unwrap())
}
