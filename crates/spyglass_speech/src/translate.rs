//! Translate TTS client.
//!
//! Drives the unofficial Google Translate speech endpoint:
//!
//! GET `https://translate.google.com/translate_tts?ie=UTF-8&q=…&tl=es&client=tw-ob`
//! Response: audio/mpeg bytes.
//!
//! The endpoint caps each request at a couple hundred characters, so long
//! text is chunked and the MP3 byte runs are concatenated in order. MP3
//! frames are self-delimiting, which makes plain concatenation playable.
//!
//! A failed synthesis is reported and abandoned; there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use spyglass_error::{SpeechError, SpeechErrorKind, SpyglassResult};
use spyglass_interface::SpeechSynthesizer;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::chunk::{CHUNK_MAX_CHARS, chunk_text};

/// Translate TTS client configuration.
#[derive(Debug, Clone)]
pub struct TranslateTtsConfig {
    /// Endpoint base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslateTtsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl TranslateTtsConfig {
    /// Config pointing at a different endpoint, mainly for test stubs.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Speech synthesizer backed by the Translate TTS endpoint.
///
/// # Examples
///
/// ```no_run
/// use spyglass_speech::TranslateTts;
/// use spyglass_interface::SpeechSynthesizer;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tts = TranslateTts::new()?;
/// let mp3 = tts.synthesize("Bienvenido a la guía definitiva", "es").await?;
/// std::fs::write("narration.mp3", mp3)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TranslateTts {
    client: Client,
    config: TranslateTtsConfig,
}

impl TranslateTts {
    /// Create a synthesizer with the default endpoint.
    pub fn new() -> SpyglassResult<Self> {
        Self::with_config(TranslateTtsConfig::default())
    }

    /// Create a synthesizer with an explicit configuration.
    pub fn with_config(config: TranslateTtsConfig) -> SpyglassResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::new(SpeechErrorKind::Http(e.to_string())))?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url)
    }

    /// Fetch the MP3 bytes for a single chunk.
    async fn fetch_chunk(&self, chunk: &str, language: &str) -> SpyglassResult<Vec<u8>> {
        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::new(SpeechErrorKind::Http(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::new(SpeechErrorKind::UnexpectedStatus(status.as_u16())).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::new(SpeechErrorKind::Http(e.to_string())))?;

        debug!(chunk_chars = chunk.chars().count(), bytes = bytes.len(), "fetched audio chunk");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for TranslateTts {
    #[instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, language: &str) -> SpyglassResult<Vec<u8>> {
        let chunks = chunk_text(text, CHUNK_MAX_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::new(SpeechErrorKind::EmptyText).into());
        }

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.fetch_chunk(chunk, language).await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::new(SpeechErrorKind::EmptyAudio).into());
        }

        info!(
            chunks = chunks.len(),
            bytes = audio.len(),
            language,
            "synthesis completed"
        );
        Ok(audio)
    }
}
