//! Route table.
//!
//! Endpoints:
//! - `GET  /`                                  single-page studio UI
//! - `GET  /health`                            liveness probe
//! - `GET  /api/models`                        active model + live listing
//! - `POST /api/sessions`                      open a session
//! - `GET  /api/sessions/:id`                  fetch a session
//! - `POST /api/sessions/:id/reset`            clear session content
//! - `POST /api/sessions/:id/topic`            store the (truncated) topic
//! - `POST /api/sessions/:id/audience`         profile the audience
//! - `POST /api/sessions/:id/outline`          generate a chapter outline
//! - `POST /api/sessions/:id/chapters`         draft a chapter
//! - `POST /api/sessions/:id/chapters/stream`  draft a chapter over SSE
//! - `GET  /api/sessions/:id/export/docx`      download chapters as .docx
//! - `GET  /api/sessions/:id/export/markdown`  download chapters as markdown
//! - `POST /api/generate/{cover,ads,landing,upsell,bump}`  one-shot assets
//! - `POST /api/scrape`                        keyword + country -> ad copy
//! - `POST /api/speech`                        text + language -> audio/mpeg
//! - `POST /api/export/landing`                HTML -> text/html attachment

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Build the full route table.
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/models", get(handlers::list_models))
        .nest("/sessions", session_routes())
        .nest("/generate", generate_routes())
        .route("/scrape", post(handlers::scrape))
        .route("/speech", post(handlers::synthesize))
        .route("/export/landing", post(handlers::export_landing))
}

fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::create_session))
        .route("/:id", get(handlers::get_session))
        .route("/:id/reset", post(handlers::reset_session))
        .route("/:id/topic", post(handlers::set_topic))
        .route("/:id/audience", post(handlers::profile_audience))
        .route("/:id/outline", post(handlers::outline))
        .route("/:id/chapters", post(handlers::draft_chapter))
        .route("/:id/chapters/stream", post(handlers::stream_chapter))
        .route("/:id/export/docx", get(handlers::export_docx))
        .route("/:id/export/markdown", get(handlers::export_markdown))
}

fn generate_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cover", post(handlers::cover))
        .route("/ads", post(handlers::ads))
        .route("/landing", post(handlers::landing))
        .route("/upsell", post(handlers::upsell))
        .route("/bump", post(handlers::order_bump))
}
