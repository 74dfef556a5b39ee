//! Test utilities for scripted generator behavior.

use async_trait::async_trait;
use futures_util::stream::{self, Stream};
use spyglass_core::{GenerateRequest, GenerateResponse};
use spyglass_error::{GeminiError, GeminiErrorKind, SpyglassResult};
use spyglass_interface::{FinishReason, StreamChunk, Streaming, TextGenerator};
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted reply from the mock generator.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with the given text.
    Text(String),
    /// Fail with a 429 quota-exhaustion error.
    QuotaExhausted,
    /// Fail with a model-not-found error.
    ModelNotFound,
    /// Fail with a 401 that no cascade should paper over.
    Unauthorized,
}

impl MockReply {
    fn into_result(self) -> SpyglassResult<GenerateResponse> {
        match self {
            MockReply::Text(text) => Ok(GenerateResponse::from_text(text)),
            MockReply::QuotaExhausted => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 429,
                message: "RESOURCE_EXHAUSTED: Quota exceeded for quota metric".to_string(),
            })
            .into()),
            MockReply::ModelNotFound => Err(GeminiError::new(GeminiErrorKind::ApiRequest(
                "models/unknown is not found for API version v1beta".to_string(),
            ))
            .into()),
            MockReply::Unauthorized => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 401,
                message: "API key not valid".to_string(),
            })
            .into()),
        }
    }
}

/// Scripted [`TextGenerator`] that replays configured replies in order.
///
/// The final script entry repeats once the script is exhausted, and every
/// call records which model the request named so tests can assert on
/// attempt order.
pub struct MockGenerator {
    script: Vec<MockReply>,
    calls: AtomicUsize,
    requested: Mutex<Vec<Option<String>>>,
    default_model: String,
}

impl MockGenerator {
    /// Mock that always succeeds with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockReply::Text(text.into())])
    }

    /// Mock that replays `script` front to back, repeating the last entry.
    pub fn new_sequence(script: Vec<MockReply>) -> Self {
        assert!(!script.is_empty(), "mock script must have at least one reply");
        Self {
            script,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            default_model: "gemini-2.5-flash".to_string(),
        }
    }

    /// Mock that fails with quota errors `failures` times, then succeeds.
    pub fn new_fail_then_succeed(failures: usize, text: impl Into<String>) -> Self {
        let mut script = vec![MockReply::QuotaExhausted; failures];
        script.push(MockReply::Text(text.into()));
        Self::new_sequence(script)
    }

    /// Number of generate calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Model names requested so far, in call order.
    pub fn requested_models(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }

    fn next_reply(&self, req: &GenerateRequest) -> MockReply {
        self.requested.lock().unwrap().push(req.model.clone());
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let capped = index.min(self.script.len() - 1);
        self.script[capped].clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        self.next_reply(req).into_result()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.default_model
    }
}

#[async_trait]
impl Streaming for MockGenerator {
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        match self.next_reply(req) {
            MockReply::Text(text) => {
                let chunk = StreamChunk {
                    content: text,
                    is_final: true,
                    finish_reason: Some(FinishReason::Stop),
                };
                Ok(Box::pin(stream::iter(vec![Ok(chunk)])))
            }
            reply => {
                // Error replies fail the opening call, before any chunk flows.
                Err(reply
                    .into_result()
                    .expect_err("non-text replies always carry an error"))
            }
        }
    }
}
