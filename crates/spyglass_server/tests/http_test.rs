//! End-to-end tests over a real listener.
//!
//! Each test binds an ephemeral port, serves the full router, and talks to
//! it with a plain HTTP client, which also covers route wiring and the SSE
//! framing that handler-level tests cannot reach.

mod test_utils;

use anyhow::Result;
use serde_json::{Value, json};
use spyglass_server::{AppState, SessionStore, create_routes};
use std::net::SocketAddr;
use std::sync::Arc;
use test_utils::{QuotaExhaustedGenerator, scripted_state, state_with};

async fn spawn(state: AppState) -> Result<(SocketAddr, SessionStore)> {
    let store = state.sessions.clone();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = create_routes().with_state(Arc::new(state));

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });

    Ok((addr, store))
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let (addr, _store) = spawn(scripted_state("unused")).await?;

    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn index_serves_the_studio_page() -> Result<()> {
    let (addr, _store) = spawn(scripted_state("unused")).await?;

    let page = reqwest::get(format!("http://{addr}/")).await?.text().await?;

    assert!(page.contains("SPYGLASS STUDIO"));
    assert!(page.contains("/api/sessions"));
    Ok(())
}

#[tokio::test]
async fn chapter_stream_emits_fragments_and_persists_the_chapter() -> Result<()> {
    let reply = "The first rule of sourdough is patience. The second is good flour.";
    let (addr, store) = spawn(scripted_state(reply)).await?;
    let client = reqwest::Client::new();

    let session: Value = client
        .post(format!("http://{addr}/api/sessions"))
        .send()
        .await?
        .json()
        .await?;
    let id = session["id"].as_str().expect("session id").to_string();

    client
        .post(format!("http://{addr}/api/sessions/{id}/topic"))
        .json(&json!({"topic": "sourdough"}))
        .send()
        .await?
        .error_for_status()?;

    let sse = client
        .post(format!("http://{addr}/api/sessions/{id}/chapters/stream"))
        .json(&json!({"title": "Patience"}))
        .send()
        .await?
        .error_for_status()?;
    assert!(
        sse.headers()["content-type"]
            .to_str()?
            .starts_with("text/event-stream")
    );

    // The stream closes after the done event, so the whole body is readable.
    let transcript = sse.text().await?;
    assert!(transcript.contains("\"text\""));
    assert!(transcript.contains("event: done"));
    assert!(transcript.contains("Patience"));

    let sessions = store.read().unwrap();
    let stored = sessions
        .values()
        .next()
        .expect("session persisted");
    assert_eq!(stored.chapters.len(), 1);
    assert_eq!(stored.chapters[0].title, "Patience");
    assert_eq!(stored.chapters[0].body, reply);
    Ok(())
}

#[tokio::test]
async fn streaming_without_topic_is_unprocessable() -> Result<()> {
    let (addr, _store) = spawn(scripted_state("unused")).await?;
    let client = reqwest::Client::new();

    let session: Value = client
        .post(format!("http://{addr}/api/sessions"))
        .send()
        .await?
        .json()
        .await?;
    let id = session["id"].as_str().expect("session id");

    let response = client
        .post(format!("http://{addr}/api/sessions/{id}/chapters/stream"))
        .json(&json!({"title": "Patience"}))
        .send()
        .await?;

    assert_eq!(response.status(), 422);
    Ok(())
}

#[tokio::test]
async fn provider_quota_exhaustion_surfaces_as_bad_gateway() -> Result<()> {
    let state = state_with(Arc::new(QuotaExhaustedGenerator), None);
    let (addr, _store) = spawn(state).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/generate/cover"))
        .json(&json!({"topic": "sourdough"}))
        .send()
        .await?;

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().expect("error field").contains("429"));
    Ok(())
}

#[tokio::test]
async fn missing_session_maps_to_404_over_http() -> Result<()> {
    let (addr, _store) = spawn(scripted_state("unused")).await?;

    let response = reqwest::get(format!(
        "http://{addr}/api/sessions/00000000-0000-0000-0000-000000000000"
    ))
    .await?;

    assert_eq!(response.status(), 404);
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_rejected() -> Result<()> {
    let (addr, _store) = spawn(scripted_state("unused")).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/scrape"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert!(response.status().is_client_error());
    Ok(())
}
