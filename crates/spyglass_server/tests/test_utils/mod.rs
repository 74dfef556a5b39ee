//! Scripted port implementations for exercising handlers without a network.
#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::stream::{self, Stream};
use spyglass_core::{AdCopy, GenerateRequest, GenerateResponse};
use spyglass_error::{
    GeminiError, GeminiErrorKind, ScrapeError, ScrapeErrorKind, SpyglassResult,
};
use spyglass_interface::{
    AdLibrary, FinishReason, ModelDiscovery, ScrapeQuery, SpeechSynthesizer, StreamChunk,
    Streaming, TextGenerator,
};
use spyglass_server::AppState;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Audience-profiling reply the scripted generator can serve.
pub const BRIEF_REPLY: &str = "```json\n{\"pain_point\": \"no time to cook\", \"promise\": \"healthy meals in 15 minutes\", \"audience\": \"busy working parents\"}\n```";

/// Generator that replies from a fixed script; the last reply repeats.
pub struct ScriptedGenerator {
    replies: Vec<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            replies: vec![reply.to_string()],
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_replies(replies: &[&str]) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts seen so far, one entry per call.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_reply(&self, req: &GenerateRequest) -> String {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = req
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let index = call.min(self.replies.len() - 1);
        self.replies[index].clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        Ok(GenerateResponse::from_text(self.next_reply(req)))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

#[async_trait]
impl Streaming for ScriptedGenerator {
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        let reply = self.next_reply(req);
        let pieces = chunked(&reply);
        let last = pieces.len().saturating_sub(1);

        let chunks: Vec<SpyglassResult<StreamChunk>> = pieces
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                Ok(StreamChunk {
                    content,
                    is_final: i == last,
                    finish_reason: (i == last).then_some(FinishReason::Stop),
                })
            })
            .collect();

        Ok(Box::pin(stream::iter(chunks)))
    }
}

/// Split a reply into small fragments, preserving every character.
fn chunked(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(8).map(|c| c.iter().collect()).collect()
}

/// Generator whose every call fails with quota exhaustion.
pub struct QuotaExhaustedGenerator;

#[async_trait]
impl TextGenerator for QuotaExhaustedGenerator {
    async fn generate(&self, _req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        Err(GeminiError::new(GeminiErrorKind::HttpError {
            status_code: 429,
            message: "RESOURCE_EXHAUSTED: quota exceeded".to_string(),
        })
        .into())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "exhausted-model"
    }
}

#[async_trait]
impl Streaming for QuotaExhaustedGenerator {
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        self.generate(req).await?;
        unreachable!("generate always fails")
    }
}

/// Fixed model listing.
pub struct StaticCatalog(pub Vec<String>);

impl StaticCatalog {
    pub fn flash_pair() -> Self {
        Self(vec![
            "gemini-2.5-flash".to_string(),
            "gemini-2.5-flash-lite".to_string(),
        ])
    }
}

#[async_trait]
impl ModelDiscovery for StaticCatalog {
    async fn list_generation_models(&self) -> SpyglassResult<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Ad library returning a fixed set of ads.
pub struct StaticLibrary(pub Vec<AdCopy>);

impl StaticLibrary {
    pub fn sample() -> Self {
        Self(vec![
            AdCopy::new("Meal prep Sundays are over", Some("QuickChef".to_string())),
            AdCopy::new("Dinner in 15, no excuses", None),
        ])
    }
}

#[async_trait]
impl AdLibrary for StaticLibrary {
    async fn scrape(&self, query: &ScrapeQuery) -> SpyglassResult<Vec<AdCopy>> {
        Ok(self.0.iter().take(query.limit).cloned().collect())
    }
}

/// Ad library whose every scrape fails upstream.
pub struct FailingLibrary;

#[async_trait]
impl AdLibrary for FailingLibrary {
    async fn scrape(&self, _query: &ScrapeQuery) -> SpyglassResult<Vec<AdCopy>> {
        Err(ScrapeError::new(ScrapeErrorKind::UnexpectedStatus {
            status_code: 500,
            message: "actor crashed".to_string(),
        })
        .into())
    }
}

/// Speech backend returning fixed bytes.
pub struct StaticSpeech(pub Vec<u8>);

impl StaticSpeech {
    pub fn mpeg_magic() -> Self {
        Self(vec![0xff, 0xfb, 0x90, 0x00, 0x00, 0x00])
    }
}

#[async_trait]
impl SpeechSynthesizer for StaticSpeech {
    async fn synthesize(&self, _text: &str, _language: &str) -> SpyglassResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// State over a scripted generator, no ad library configured.
pub fn scripted_state(reply: &str) -> AppState {
    state_with(Arc::new(ScriptedGenerator::new(reply)), None)
}

/// State with explicit generator and ad-library ports.
pub fn state_with(
    generator: Arc<dyn Streaming>,
    ad_library: Option<Arc<dyn AdLibrary>>,
) -> AppState {
    AppState::new(
        generator,
        Arc::new(StaticCatalog::flash_pair()),
        ad_library,
        Arc::new(StaticSpeech::mpeg_magic()),
        vec!["gemini-2.5-flash-lite".to_string()],
    )
}
