//! Model fallback cascade.
//!
//! Quota exhaustion and retired model names are the two ways a working page
//! suddenly stops generating. The [`FallbackGenerator`] wraps any
//! [`TextGenerator`] and retries the same request against an ordered list of
//! alternate models when the active one fails for either reason. Once the
//! cascade is walking the fallback list, any model that errors is skipped;
//! the first model that answers wins.

use async_trait::async_trait;
use futures_util::stream::Stream;
use spyglass_core::{GenerateRequest, GenerateResponse};
use spyglass_error::{GeminiError, GeminiErrorKind, SpyglassError, SpyglassErrorKind, SpyglassResult};
use spyglass_interface::{StreamChunk, Streaming, TextGenerator};
use std::pin::Pin;
use tracing::warn;

/// Check whether an error should move the cascade to its next candidate.
///
/// Only provider errors reporting quota exhaustion or an unknown model
/// qualify; everything else is surfaced to the caller as-is.
fn prompts_fallback(err: &SpyglassError) -> bool {
    match err.kind() {
        SpyglassErrorKind::Gemini(gemini) => gemini.prompts_fallback(),
        _ => false,
    }
}

/// Wraps a generator with an ordered list of fallback models.
///
/// For each request the cascade tries the requested model first (or the
/// inner generator's default when the request names none), then each
/// fallback in order, skipping duplicates. The requested model only cedes
/// to the fallbacks when its failure is recoverable by switching models;
/// after that, every fallback that errors is skipped in favor of the next.
/// The last attempt's error is reported when every candidate fails.
///
/// # Examples
///
/// ```no_run
/// use spyglass_models::{FallbackGenerator, GeminiClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cascade = FallbackGenerator::new(
///     GeminiClient::new()?,
///     vec![
///         "gemini-2.5-flash-lite".to_string(),
///         "gemini-2.0-flash".to_string(),
///     ],
/// );
/// # Ok(())
/// # }
/// ```
pub struct FallbackGenerator<G> {
    inner: G,
    fallbacks: Vec<String>,
}

impl<G> FallbackGenerator<G> {
    /// Wrap a generator with fallback models tried in the given order.
    pub fn new(inner: G, fallbacks: Vec<String>) -> Self {
        Self { inner, fallbacks }
    }

    /// The configured fallback models, in cascade order.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Access the wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: TextGenerator> FallbackGenerator<G> {
    /// Candidate models in attempt order: the requested model first, then
    /// each fallback not already present.
    fn candidates(&self, requested: Option<&str>) -> Vec<String> {
        let first = requested.unwrap_or_else(|| self.inner.model_name()).to_string();

        let mut order = vec![first];
        for fallback in &self.fallbacks {
            if !order.iter().any(|m| m == fallback) {
                order.push(fallback.clone());
            }
        }
        order
    }

    /// Error used when the candidate list is empty, which only happens
    /// with an empty default model name.
    fn exhausted() -> SpyglassError {
        GeminiError::new(GeminiErrorKind::NoModelAvailable(
            "fallback cascade had no candidates".to_string(),
        ))
        .into()
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for FallbackGenerator<G> {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        let candidates = self.candidates(req.model.as_deref());
        let mut last_err: Option<SpyglassError> = None;

        for (attempt_no, model) in candidates.iter().enumerate() {
            let mut attempt = req.clone();
            attempt.model = Some(model.clone());

            match self.inner.generate(&attempt).await {
                Ok(response) => return Ok(response),
                // A failure switching models cannot fix aborts the cascade,
                // but only before it has started walking the fallback list.
                Err(err) if attempt_no == 0 && !prompts_fallback(&err) => return Err(err),
                Err(err) => {
                    warn!(model = %model, error = %err, "model failed, trying next candidate");
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or_else(Self::exhausted))
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[async_trait]
impl<G: Streaming> Streaming for FallbackGenerator<G> {
    /// Stream from the first candidate whose stream opens.
    ///
    /// Failures after the stream has started flow through the stream
    /// itself; the cascade only covers the opening call.
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        let candidates = self.candidates(req.model.as_deref());
        let mut last_err: Option<SpyglassError> = None;

        for (attempt_no, model) in candidates.iter().enumerate() {
            let mut attempt = req.clone();
            attempt.model = Some(model.clone());

            match self.inner.generate_stream(&attempt).await {
                Ok(stream) => return Ok(stream),
                Err(err) if attempt_no == 0 && !prompts_fallback(&err) => return Err(err),
                Err(err) => {
                    warn!(model = %model, error = %err, "stream failed to open, trying next candidate");
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or_else(Self::exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_errors_prompt_fallback() {
        let err: SpyglassError = GeminiError::new(GeminiErrorKind::HttpError {
            status_code: 429,
            message: "Quota exceeded".to_string(),
        })
        .into();
        assert!(prompts_fallback(&err));
    }

    #[test]
    fn unknown_model_errors_prompt_fallback() {
        let err: SpyglassError = GeminiError::new(GeminiErrorKind::ApiRequest(
            "models/gemini-old is not found for API version v1beta".to_string(),
        ))
        .into();
        assert!(prompts_fallback(&err));
    }

    #[test]
    fn auth_errors_do_not_prompt_fallback() {
        let err: SpyglassError = GeminiError::new(GeminiErrorKind::HttpError {
            status_code: 401,
            message: "Invalid API key".to_string(),
        })
        .into();
        assert!(!prompts_fallback(&err));
    }

    #[test]
    fn non_provider_errors_do_not_prompt_fallback() {
        let err: SpyglassError = spyglass_error::HttpError::new("connection refused").into();
        assert!(!prompts_fallback(&err));
    }
}
