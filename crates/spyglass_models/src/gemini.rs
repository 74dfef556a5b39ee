//! Google Gemini API implementation.
//!
//! This module provides a client for the Google Gemini API with support for:
//! - Per-request model selection (different requests can use different models)
//! - Client pooling with lazy initialization (one client per model)
//! - Per-model pacing (each model has an independent pacer)
//! - Thread-safe concurrent access
//!
//! # Architecture
//!
//! The [`GeminiClient`] maintains a pool of model-specific clients, each wrapped
//! in its own pacer. When a request names a model (via `GenerateRequest.model`),
//! the client either retrieves the existing entry for that model or creates a
//! new one on demand.
//!
//! Pooling is what makes the fallback cascade cheap: switching models reuses an
//! already-warmed client instead of rebuilding one per attempt.
//!
//! # Example
//!
//! ```no_run
//! use spyglass_models::GeminiClient;
//! use spyglass_core::{GenerateRequest, Message};
//! use spyglass_interface::TextGenerator;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//!
//! // Use the default model
//! let request1 = GenerateRequest {
//!     messages: vec![Message::user("Hello")],
//!     model: None,
//!     ..Default::default()
//! };
//! let response1 = client.generate(&request1).await?;
//!
//! // Override to use a different model
//! let request2 = GenerateRequest {
//!     messages: vec![Message::user("Complex task")],
//!     model: Some("gemini-2.5-pro".to_string()),
//!     ..Default::default()
//! };
//! let response2 = client.generate(&request2).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::instrument;

use gemini_rust::{Gemini, client::Model};

use spyglass_core::{GenerateRequest, GenerateResponse, Role};
use spyglass_error::{GeminiError, GeminiErrorKind, SpyglassResult};
use spyglass_interface::{FinishReason, StreamChunk, Streaming, TextGenerator};

use crate::{Pacer, PacingConfig};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Default model used when `GenerateRequest.model` is None and no override
/// was configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Google Gemini API with per-model client pooling.
///
/// This client maintains a cache of model-specific Gemini clients, each with
/// its own pacer. Entries are created lazily on first use for each model.
///
/// # Architecture
///
/// - **Client Pool**: `HashMap<String, Pacer<Gemini>>`
/// - **Lazy Creation**: Clients are created on first request for each model
/// - **Thread-Safe**: Uses `Arc<Mutex<HashMap>>` for concurrent access
pub struct GeminiClient {
    /// Cache of model-specific REST API clients with pacing
    clients: Arc<Mutex<HashMap<String, Pacer<Gemini>>>>,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
    /// Pacing limits applied to every pooled client
    pacing: PacingConfig,
    /// Retry configuration
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().unwrap().len();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("pacing", &self.pacing)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Maps common model name strings to their corresponding Model enum
    /// variants. Uses Model::Custom for unrecognized model names,
    /// automatically adding the "models/" prefix required by the Gemini API.
    ///
    /// # Examples
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash") (preserved)
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            // For other model names, use Custom variant with "models/" prefix
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Create a new Gemini client with default (free-tier) pacing.
    ///
    /// Reads the API key from the `GOOGLE_API_KEY` environment variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spyglass_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> SpyglassResult<Self> {
        Self::new_with_pacing(None)
    }

    /// Create a new Gemini client with explicit pacing limits.
    ///
    /// Reads the API key from the `GOOGLE_API_KEY` environment variable and
    /// applies the given pacing to every pooled model client. `None` selects
    /// the free-tier defaults.
    #[instrument(name = "gemini_client_new_with_pacing", skip(pacing))]
    pub fn new_with_pacing(pacing: Option<PacingConfig>) -> SpyglassResult<Self> {
        Self::new_internal(pacing).map_err(Into::into)
    }

    /// Create a new Gemini client with pacing and retry configuration.
    ///
    /// # Arguments
    ///
    /// * `pacing` - Optional pacing limits (free-tier defaults when None)
    /// * `no_retry` - Disable automatic retry
    /// * `max_retries` - Override maximum retry attempts
    /// * `retry_backoff_ms` - Override initial backoff delay
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spyglass_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // Create client with retry disabled
    /// let client = GeminiClient::new_with_retry(None, true, None, None)?;
    ///
    /// // Create client with custom retry limits
    /// let client = GeminiClient::new_with_retry(None, false, Some(3), Some(1000))?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new_with_retry", skip(pacing))]
    pub fn new_with_retry(
        pacing: Option<PacingConfig>,
        no_retry: bool,
        max_retries: Option<usize>,
        retry_backoff_ms: Option<u64>,
    ) -> SpyglassResult<Self> {
        let mut client = Self::new_internal(pacing)?;
        client.no_retry = no_retry;
        client.max_retries = max_retries;
        client.retry_backoff_ms = retry_backoff_ms;
        Ok(client)
    }

    /// Create a client from an explicit API key instead of the environment.
    ///
    /// Useful when the key arrives through configuration or a request
    /// rather than the process environment.
    pub fn from_key(api_key: impl Into<String>, pacing: Option<PacingConfig>) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key: api_key.into(),
            model_name: DEFAULT_MODEL.to_string(),
            pacing: pacing.unwrap_or_default(),
            no_retry: false,
            max_retries: None,
            retry_backoff_ms: None,
        }
    }

    /// Replace the default model used when requests name none.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.model_name = model.into();
        self
    }

    /// Internal constructor that returns Gemini-specific errors.
    fn new_internal(pacing: Option<PacingConfig>) -> GeminiResult<Self> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: DEFAULT_MODEL.to_string(),
            pacing: pacing.unwrap_or_default(),
            no_retry: false,
            max_retries: None,
            retry_backoff_ms: None,
        })
    }

    /// Get or create the paced client for a model.
    fn client_for(&self, model_name: &str) -> GeminiResult<Pacer<Gemini>> {
        let mut clients = self.clients.lock().unwrap();

        if let Some(existing) = clients.get(model_name) {
            return Ok(existing.clone());
        }

        let model_enum = Self::model_name_to_enum(model_name);
        let client = Gemini::with_model(&self.api_key, model_enum)
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        let paced = Pacer::new_with_retry(
            client,
            &self.pacing,
            self.no_retry,
            self.max_retries,
            self.retry_backoff_ms,
        );
        clients.insert(model_name.to_string(), paced.clone());
        Ok(paced)
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        // Determine which model to use
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);

        let paced_client = self.client_for(model_name)?;

        // Clone data needed in the closure
        let messages = req.messages.clone();
        let temperature = req.temperature;
        let max_tokens = req.max_tokens;

        // Execute with pacing and automatic retry
        let response = paced_client
            .execute(|| async {
                // Access the client through the pacer
                let client = paced_client.inner();

                // Start building the request
                let mut builder = client.generate_content();

                // Process messages in order; Gemini takes the system prompt
                // through a dedicated slot rather than the turn list
                let mut system_prompt = None;

                for msg in &messages {
                    match msg.role {
                        Role::System => {
                            system_prompt = Some(msg.content.clone());
                        }
                        Role::User => {
                            builder = builder.with_user_message(&msg.content);
                        }
                        Role::Assistant => {
                            builder = builder.with_model_message(&msg.content);
                        }
                    }
                }

                if let Some(prompt) = &system_prompt {
                    builder = builder.with_system_prompt(prompt);
                }

                // Apply optional parameters
                if let Some(temp) = temperature {
                    builder = builder.with_temperature(temp);
                }

                if let Some(max_tok) = max_tokens {
                    builder = builder.with_max_output_tokens(max_tok as i32);
                }

                // Execute the request and parse errors
                builder.execute().await.map_err(Self::parse_gemini_error)
            })
            .await?;

        // Extract text from response
        let text = response.text();

        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
        }

        Ok(GenerateResponse::from_text(text))
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured GeminiError
    /// with HTTP status codes when available.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Try to extract HTTP status code from error message
        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    ///
    /// Parses strings like "bad response from server; code 503; description: ..."
    /// and extracts the numeric status code.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        if let Some(code_start) = error_msg.find("code ") {
            let code_str = &error_msg[code_start + 5..];
            if let Some(end) = code_str.find(|c: char| !c.is_numeric()) {
                return code_str[..end].parse().ok();
            }
        }
        None
    }

    /// Convert a gemini_rust GenerationResponse to our StreamChunk.
    fn convert_to_stream_chunk(
        response: gemini_rust::generation::model::GenerationResponse,
    ) -> SpyglassResult<StreamChunk> {
        use gemini_rust::generation::model::FinishReason as GeminiFinishReason;

        let text = response.text();

        // A reported finish reason marks the final chunk
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_ref())
            .map(|reason| match reason {
                GeminiFinishReason::Stop => FinishReason::Stop,
                GeminiFinishReason::MaxTokens => FinishReason::Length,
                GeminiFinishReason::Safety
                | GeminiFinishReason::Recitation
                | GeminiFinishReason::Blocklist
                | GeminiFinishReason::ProhibitedContent
                | GeminiFinishReason::Spii
                | GeminiFinishReason::ImageSafety => FinishReason::ContentFilter,
                _ => FinishReason::Other,
            });

        Ok(StreamChunk {
            content: text,
            is_final: finish_reason.is_some(),
            finish_reason,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> SpyglassResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// Returns the default model name used when `GenerateRequest.model` is None.
    ///
    /// Individual requests may use different models by specifying
    /// `GenerateRequest.model`.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl Streaming for GeminiClient {
    async fn generate_stream(
        &self,
        req: &GenerateRequest,
    ) -> SpyglassResult<
        std::pin::Pin<
            Box<dyn futures_util::stream::Stream<Item = SpyglassResult<StreamChunk>> + Send>,
        >,
    > {
        use futures_util::{StreamExt, TryStreamExt};

        // Determine which model to use
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);

        let paced_client = self.client_for(model_name)?;

        // Acquire pacing permission (counts the stream as a single request)
        let _guard = paced_client.acquire().await;

        // Access the client through the pacer
        let client = paced_client.inner();

        // Build request using builder API (same as generate_internal)
        let mut builder = client.generate_content();
        let mut system_prompt = None;

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    system_prompt = Some(msg.content.clone());
                }
                Role::User => {
                    builder = builder.with_user_message(&msg.content);
                }
                Role::Assistant => {
                    builder = builder.with_model_message(&msg.content);
                }
            }
        }

        if let Some(prompt) = &system_prompt {
            builder = builder.with_system_prompt(prompt);
        }

        if let Some(temp) = req.temperature {
            builder = builder.with_temperature(temp);
        }

        if let Some(max_tokens) = req.max_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        // Execute as stream
        let gemini_stream = builder
            .execute_stream()
            .await
            .map_err(Self::parse_gemini_error)?;

        // Transform gemini TryStream to Stream<Result>
        let chunk_stream = gemini_stream.into_stream().map(move |result| match result {
            Ok(response) => Self::convert_to_stream_chunk(response),
            Err(e) => Err(Self::parse_gemini_error(e).into()),
        });

        Ok(Box::pin(chunk_stream))
    }
}
