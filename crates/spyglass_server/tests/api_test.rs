//! Handler-level tests over scripted backends.

mod test_utils;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use spyglass_core::TOPIC_MAX_CHARS;
use spyglass_server::handlers::{
    self, ChapterRequest, GenerateBody, LandingExportRequest, ScrapeRequest, SpeechRequest,
    TopicRequest,
};
use spyglass_server::AppState;
use std::sync::Arc;
use test_utils::{
    BRIEF_REPLY, FailingLibrary, ScriptedGenerator, StaticLibrary, scripted_state, state_with,
};
use uuid::Uuid;

fn generate_body(topic: &str) -> GenerateBody {
    GenerateBody {
        topic: topic.to_string(),
        audience: None,
        seed_keyword: None,
        country: None,
        seed_limit: None,
    }
}

#[tokio::test]
async fn created_session_can_be_fetched() {
    let state = Arc::new(scripted_state("unused"));

    let Json(created) = handlers::create_session(State(state.clone())).await;
    let fetched = handlers::get_session(State(state), Path(created.id))
        .await
        .expect("session exists");

    assert_eq!(fetched.0.id, created.id);
    assert!(fetched.0.chapters.is_empty());
}

#[tokio::test]
async fn unknown_session_is_a_404() {
    let state = Arc::new(scripted_state("unused"));

    let err = handlers::get_session(State(state), Path(Uuid::new_v4()))
        .await
        .expect_err("no such session");

    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn topic_is_truncated_at_the_cap() {
    let state = Arc::new(scripted_state("unused"));
    let Json(session) = handlers::create_session(State(state.clone())).await;

    let long_topic = "x".repeat(TOPIC_MAX_CHARS + 100);
    let updated = handlers::set_topic(
        State(state),
        Path(session.id),
        Json(TopicRequest { topic: long_topic }),
    )
    .await
    .expect("topic accepted");

    let stored = updated.0.topic.expect("topic stored");
    assert_eq!(stored.chars().count(), TOPIC_MAX_CHARS);
}

#[tokio::test]
async fn blank_topic_is_rejected() {
    let state = Arc::new(scripted_state("unused"));
    let Json(session) = handlers::create_session(State(state.clone())).await;

    let err = handlers::set_topic(
        State(state),
        Path(session.id),
        Json(TopicRequest {
            topic: "   ".to_string(),
        }),
    )
    .await
    .expect_err("blank topic");

    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn drafted_chapters_append_in_order() {
    let state = Arc::new(scripted_state("Drafted body text."));
    let Json(session) = handlers::create_session(State(state.clone())).await;
    let _ = handlers::set_topic(
        State(state.clone()),
        Path(session.id),
        Json(TopicRequest {
            topic: "meal prep".to_string(),
        }),
    )
    .await
    .expect("topic accepted");

    for title in ["First", "Second"] {
        let chapter = handlers::draft_chapter(
            State(state.clone()),
            Path(session.id),
            Json(ChapterRequest {
                title: title.to_string(),
            }),
        )
        .await
        .expect("chapter drafted");
        assert_eq!(chapter.0.body, "Drafted body text.");
    }

    let stored = state.session(&session.id).expect("session exists");
    let titles: Vec<&str> = stored.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn drafting_without_topic_is_unprocessable() {
    let state = Arc::new(scripted_state("unused"));
    let Json(session) = handlers::create_session(State(state.clone())).await;

    let err = handlers::draft_chapter(
        State(state),
        Path(session.id),
        Json(ChapterRequest {
            title: "Chapter 1".to_string(),
        }),
    )
    .await
    .expect_err("no topic set");

    assert_eq!(
        err.into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn audience_profiling_parses_and_stores_the_brief() {
    let state = Arc::new(scripted_state(BRIEF_REPLY));
    let Json(session) = handlers::create_session(State(state.clone())).await;
    let _ = handlers::set_topic(
        State(state.clone()),
        Path(session.id),
        Json(TopicRequest {
            topic: "healthy cooking".to_string(),
        }),
    )
    .await
    .expect("topic accepted");

    let response = handlers::profile_audience(State(state.clone()), Path(session.id))
        .await
        .expect("profiling succeeds");

    assert_eq!(response.0.brief.pain_point(), "no time to cook");
    assert_eq!(response.0.brief.audience(), "busy working parents");

    let stored = state.session(&session.id).expect("session exists");
    assert!(stored.brief.is_some());
    assert!(stored.audience.is_some());
}

#[tokio::test]
async fn session_reset_clears_content_but_keeps_identity() {
    let state = Arc::new(scripted_state("Body."));
    let Json(session) = handlers::create_session(State(state.clone())).await;
    let _ = handlers::set_topic(
        State(state.clone()),
        Path(session.id),
        Json(TopicRequest {
            topic: "gardening".to_string(),
        }),
    )
    .await
    .expect("topic accepted");
    let _ = handlers::draft_chapter(
        State(state.clone()),
        Path(session.id),
        Json(ChapterRequest {
            title: "Soil".to_string(),
        }),
    )
    .await
    .expect("chapter drafted");

    let reset = handlers::reset_session(State(state), Path(session.id))
        .await
        .expect("reset succeeds");

    assert_eq!(reset.0.id, session.id);
    assert!(reset.0.topic.is_none());
    assert!(reset.0.chapters.is_empty());
}

#[tokio::test]
async fn seeded_generation_inlines_scraped_ads() {
    let generator = Arc::new(ScriptedGenerator::new("Three winning ads."));
    let state = Arc::new(state_with(
        generator.clone(),
        Some(Arc::new(StaticLibrary::sample())),
    ));

    let mut body = generate_body("meal prep");
    body.seed_keyword = Some("meal prep".to_string());

    let _ = handlers::ads(State(state), Json(body))
        .await
        .expect("generation succeeds");

    let prompts = generator.prompts();
    let prompt = prompts.last().expect("one generation call");
    assert!(prompt.contains("Meal prep Sundays are over"));
    assert!(prompt.contains("[QuickChef]"));
}

#[tokio::test]
async fn failed_seed_scrape_degrades_to_unseeded_generation() {
    let generator = Arc::new(ScriptedGenerator::new("Unseeded ads."));
    let state = Arc::new(state_with(generator.clone(), Some(Arc::new(FailingLibrary))));

    let mut body = generate_body("meal prep");
    body.seed_keyword = Some("meal prep".to_string());

    let response = handlers::ads(State(state), Json(body))
        .await
        .expect("generation still succeeds");
    assert_eq!(response.0.text, "Unseeded ads.");

    let prompts = generator.prompts();
    assert!(!prompts.last().expect("one call").contains("competitor"));
}

#[tokio::test]
async fn scrape_without_configured_library_is_503() {
    let state = Arc::new(scripted_state("unused"));

    let err = handlers::scrape(
        State(state),
        Json(ScrapeRequest {
            keyword: "keto".to_string(),
            country: "US".to_string(),
            limit: None,
        }),
    )
    .await
    .expect_err("no scraper configured");

    assert_eq!(
        err.into_response().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn scrape_with_blank_keyword_is_400() {
    let state = Arc::new(state_with(
        Arc::new(ScriptedGenerator::new("unused")),
        Some(Arc::new(StaticLibrary::sample())),
    ));

    let err = handlers::scrape(
        State(state),
        Json(ScrapeRequest {
            keyword: "  ".to_string(),
            country: "US".to_string(),
            limit: None,
        }),
    )
    .await
    .expect_err("blank keyword");

    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scrape_honors_the_limit() {
    let state = Arc::new(state_with(
        Arc::new(ScriptedGenerator::new("unused")),
        Some(Arc::new(StaticLibrary::sample())),
    ));

    let response = handlers::scrape(
        State(state),
        Json(ScrapeRequest {
            keyword: "meal prep".to_string(),
            country: "US".to_string(),
            limit: Some(1),
        }),
    )
    .await
    .expect("scrape succeeds");

    assert_eq!(response.0.ads.len(), 1);
}

#[tokio::test]
async fn speech_responds_with_mpeg_audio() {
    let state = Arc::new(scripted_state("unused"));

    let response = handlers::synthesize(
        State(state),
        Json(SpeechRequest {
            text: "hello there".to_string(),
            language: "en".to_string(),
        }),
    )
    .await
    .expect("synthesis succeeds");

    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "audio/mpeg"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    assert_eq!(&bytes[..2], &[0xff, 0xfb]);
}

#[tokio::test]
async fn docx_export_requires_chapters() {
    let state = Arc::new(scripted_state("unused"));
    let Json(session) = handlers::create_session(State(state.clone())).await;

    let err = handlers::export_docx(State(state), Path(session.id))
        .await
        .expect_err("nothing to export");

    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn docx_export_is_a_zip_attachment() {
    let state = Arc::new(scripted_state("Chapter body."));
    let Json(session) = handlers::create_session(State(state.clone())).await;
    let _ = handlers::set_topic(
        State(state.clone()),
        Path(session.id),
        Json(TopicRequest {
            topic: "sourdough".to_string(),
        }),
    )
    .await
    .expect("topic accepted");
    let _ = handlers::draft_chapter(
        State(state.clone()),
        Path(session.id),
        Json(ChapterRequest {
            title: "Starters".to_string(),
        }),
    )
    .await
    .expect("chapter drafted");

    let response = handlers::export_docx(State(state), Path(session.id))
        .await
        .expect("export succeeds");

    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("attachment header")
        .to_str()
        .expect("ascii header");
    assert!(disposition.contains("ebook_draft.docx"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn markdown_export_uses_the_topic_as_title() {
    let state = Arc::new(scripted_state("Rise and fold."));
    let Json(session) = handlers::create_session(State(state.clone())).await;
    let _ = handlers::set_topic(
        State(state.clone()),
        Path(session.id),
        Json(TopicRequest {
            topic: "sourdough".to_string(),
        }),
    )
    .await
    .expect("topic accepted");
    let _ = handlers::draft_chapter(
        State(state.clone()),
        Path(session.id),
        Json(ChapterRequest {
            title: "Starters".to_string(),
        }),
    )
    .await
    .expect("chapter drafted");

    let response = handlers::export_markdown(State(state), Path(session.id))
        .await
        .expect("export succeeds");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let text = String::from_utf8(bytes.to_vec()).expect("utf-8 digest");

    assert!(text.starts_with("# sourdough\n"));
    assert!(text.contains("## Starters"));
    assert!(text.contains("Rise and fold."));
}

#[tokio::test]
async fn landing_export_echoes_html_verbatim() {
    let html = "<!DOCTYPE html><html><body><h1>Buy</h1></body></html>";

    let response = handlers::export_landing(Json(LandingExportRequest {
        html: html.to_string(),
        filename: None,
    }))
    .await
    .expect("export succeeds");

    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("attachment header")
        .to_str()
        .expect("ascii header");
    assert!(disposition.contains("landing_page.html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    assert_eq!(bytes.as_ref(), html.as_bytes());
}

#[tokio::test]
async fn models_endpoint_reports_active_model_and_listing() {
    let state = Arc::new(scripted_state("unused"));

    let response = handlers::list_models(State(state))
        .await
        .expect("listing succeeds");

    assert_eq!(response.0.active, "scripted-model");
    assert_eq!(response.0.fallbacks, vec!["gemini-2.5-flash-lite"]);
    assert!(
        response
            .0
            .models
            .contains(&"gemini-2.5-flash".to_string())
    );
}

#[tokio::test]
async fn generation_reuses_one_shared_state() {
    // A second handle to the same state sees sessions made through the first.
    let state: Arc<AppState> = Arc::new(scripted_state("unused"));
    let Json(session) = handlers::create_session(State(state.clone())).await;

    let other = state.clone();
    assert!(other.session(&session.id).is_ok());
}
