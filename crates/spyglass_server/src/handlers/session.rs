//! Session lifecycle and session-scoped generation.
//!
//! Generation never runs while holding the session lock: handlers copy the
//! session out, run the model call on the copy, and write the finished
//! artifact back through [`AppState::update_session`].

use crate::error::ApiError;
use crate::handlers::non_blank;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use spyglass_core::{AudienceBrief, Chapter};
use spyglass_studio::Session;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Open a fresh session.
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<Session> {
    let session = state.create_session();
    info!(session = %session.id, "session created");
    Json(session)
}

/// Fetch a session.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(state.session(&id)?))
}

/// Clear a session's content, keeping its identity.
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    let session = state.update_session(&id, |session| {
        session.reset();
        session.clone()
    })?;
    info!(session = %id, "session reset");
    Ok(Json(session))
}

/// Topic assignment body.
#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    /// Topic text; anything past the topic cap is dropped.
    pub topic: String,
}

/// Store the session topic, truncated to the topic cap.
pub async fn set_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<TopicRequest>,
) -> Result<Json<Session>, ApiError> {
    let topic = non_blank(&req.topic, "topic")?;
    let session = state.update_session(&id, |session| {
        session.set_topic(&topic);
        session.clone()
    })?;
    Ok(Json(session))
}

/// Audience-profiling result.
#[derive(Debug, Serialize)]
pub struct AudienceResponse {
    /// Structured brief parsed out of the model reply.
    pub brief: AudienceBrief,
    /// The raw profiling reply the brief was extracted from.
    pub audience: Option<String>,
}

/// Profile the target audience for the session topic and store the brief.
pub async fn profile_audience(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AudienceResponse>, ApiError> {
    let mut session = state.session(&id)?;
    let brief = state.studio.profile_audience(&mut session).await?;

    let audience = session.audience.clone();
    state.update_session(&id, |stored| {
        stored.audience = session.audience.clone();
        stored.brief = session.brief.clone();
    })?;

    Ok(Json(AudienceResponse { brief, audience }))
}

/// Chapter-outline result.
#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    /// Numbered outline text as the model wrote it.
    pub outline: String,
}

/// Generate a chapter outline for the session topic.
pub async fn outline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OutlineResponse>, ApiError> {
    let session = state.session(&id)?;
    let outline = state.studio.outline(&session).await?;
    Ok(Json(OutlineResponse { outline }))
}

/// Chapter-draft body.
#[derive(Debug, Deserialize)]
pub struct ChapterRequest {
    /// Title of the chapter to draft.
    pub title: String,
}

/// Draft one chapter and append it to the session.
pub async fn draft_chapter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChapterRequest>,
) -> Result<Json<Chapter>, ApiError> {
    let title = non_blank(&req.title, "title")?;

    let mut session = state.session(&id)?;
    let chapter = state.studio.draft_chapter(&mut session, &title).await?;

    state.update_session(&id, |stored| stored.add_chapter(chapter.clone()))?;
    info!(session = %id, title = %chapter.title, "chapter drafted");

    Ok(Json(chapter))
}

/// Draft one chapter as a stream of SSE text fragments.
///
/// Events carry single-line JSON payloads: unnamed events are
/// `{"text": …}` fragments, `error` events are `{"error": …}`, and a final
/// `done` event carries `{"title": …}` once the chapter has been appended
/// to the session.
pub async fn stream_chapter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChapterRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let title = non_blank(&req.title, "title")?;

    let (topic, audience) = {
        let session = state.session(&id)?;
        (
            session.topic.clone().unwrap_or_default(),
            session.audience_line(),
        )
    };

    let inner = state
        .studio
        .draft_chapter_stream(&topic, audience.as_deref(), &title)
        .await?;

    let store = state.sessions.clone();
    let events = async_stream::stream! {
        let mut inner = inner;
        let mut body = String::new();

        loop {
            match inner.next().await {
                Some(Ok(chunk)) => {
                    if !chunk.content.is_empty() {
                        body.push_str(&chunk.content);
                        let payload = json!({"text": chunk.content}).to_string();
                        yield Ok(Event::default().data(payload));
                    }
                }
                Some(Err(err)) => {
                    warn!(session = %id, error = %err, "chapter stream failed mid-flight");
                    let payload = json!({"error": err.to_string()}).to_string();
                    yield Ok(Event::default().event("error").data(payload));
                    return;
                }
                None => break,
            }
        }

        let chapter = Chapter::new(title.clone(), body);
        if let Some(session) = store.write().unwrap().get_mut(&id) {
            session.add_chapter(chapter);
        }
        info!(session = %id, title = %title, "chapter drafted via stream");

        let payload = json!({"title": title}).to_string();
        yield Ok(Event::default().event("done").data(payload));
    };

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
