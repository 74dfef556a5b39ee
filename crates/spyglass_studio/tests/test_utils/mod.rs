//! Test utilities for scripted studio runs.

use async_trait::async_trait;
use spyglass_core::{GenerateRequest, GenerateResponse};
use spyglass_error::SpyglassResult;
use spyglass_interface::TextGenerator;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted [`TextGenerator`] that replays configured reply texts in order
/// and records every prompt it receives.
///
/// The final reply repeats once the script is exhausted.
pub struct ScriptedGenerator {
    replies: Vec<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Mock that always replies with `reply`.
    pub fn new_success(reply: impl Into<String>) -> Self {
        Self::new_sequence(vec![reply.into()])
    }

    /// Mock that replays `replies` front to back, repeating the last.
    pub fn new_sequence(replies: Vec<String>) -> Self {
        assert!(!replies.is_empty(), "script must have at least one reply");
        Self {
            replies,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        let prompt = req
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let capped = index.min(self.replies.len() - 1);
        Ok(GenerateResponse::from_text(self.replies[capped].clone()))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
