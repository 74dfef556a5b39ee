//! Trait definitions for generation backends and their capabilities.

use crate::{ScrapeQuery, StreamChunk};
use async_trait::async_trait;
use futures_util::stream::Stream;
use spyglass_core::{AdCopy, GenerateRequest, GenerateResponse};
use spyglass_error::SpyglassResult;
use std::pin::Pin;
use std::sync::Arc;

/// Core trait that all text-generation backends must implement.
///
/// This provides the minimal interface for synchronous text generation.
/// Additional capabilities are exposed through optional traits.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate model output given a request.
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

/// Trait for backends that support streaming responses.
#[async_trait]
pub trait Streaming: TextGenerator {
    /// Generate a streaming response.
    ///
    /// Returns a stream that yields chunks as they arrive from the API.
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>>;
}

// Shared handles generate too, so pipelines can hold one backend behind
// `Arc<dyn Streaming>` and still satisfy `TextGenerator` bounds.
#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: Streaming + ?Sized> Streaming for Arc<T> {
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        (**self).generate_stream(req).await
    }
}

/// Trait for backends that can report which models they serve.
#[async_trait]
pub trait ModelDiscovery: Send + Sync {
    /// List the identifiers of models that support text generation.
    ///
    /// Identifiers are returned without any provider path prefix, in the
    /// order the provider reports them.
    async fn list_generation_models(&self) -> SpyglassResult<Vec<String>>;
}

/// Trait for ad-library scrapers.
///
/// Implementations run a remote scrape and hand back ad copy for prompt
/// seeding. Scrapes are advisory: callers treat failures as a degraded
/// path, never a fatal one.
#[async_trait]
pub trait AdLibrary: Send + Sync {
    /// Scrape ad copy matching the query.
    async fn scrape(&self, query: &ScrapeQuery) -> SpyglassResult<Vec<AdCopy>>;
}

/// Trait for text-to-speech backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for the text in the given language.
    ///
    /// `language` is a BCP-47 style code such as `"es"` or `"en"`.
    /// Returns encoded audio bytes ready to hand to a player.
    async fn synthesize(&self, text: &str, language: &str) -> SpyglassResult<Vec<u8>>;
}
