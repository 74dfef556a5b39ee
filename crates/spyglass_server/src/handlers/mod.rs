//! Request handlers, grouped by concern.

mod export;
mod generate;
mod models;
mod page;
mod scrape;
mod session;
mod speech;

pub use export::{LandingExportRequest, export_docx, export_landing, export_markdown};
pub use generate::{GenerateBody, GeneratedText, ads, cover, landing, order_bump, upsell};
pub use models::{ModelsResponse, list_models};
pub use page::{health, index};
pub use scrape::{ScrapeRequest, ScrapeResponse, scrape};
pub use session::{
    AudienceResponse, ChapterRequest, OutlineResponse, TopicRequest, create_session,
    draft_chapter, get_session, outline, profile_audience, reset_session, set_topic,
    stream_chapter,
};
pub use speech::{SpeechRequest, synthesize};

use crate::error::ApiError;
use spyglass_error::{ServerError, ServerErrorKind};

/// Trim a required field, rejecting blank values with a 400.
pub(crate) fn non_blank(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let err = ServerError::new(ServerErrorKind::InvalidRequest(format!(
            "{field} cannot be empty"
        )));
        return Err(spyglass_error::SpyglassError::from(err).into());
    }
    Ok(trimmed.to_string())
}
