//! Model discovery against the Gemini REST catalog.
//!
//! The generation SDK has no listing call, so discovery goes straight to the
//! `models` endpoint of the Generative Language API and keeps only entries
//! that can serve `generateContent`.

use async_trait::async_trait;
use serde::Deserialize;
use spyglass_error::{GeminiError, GeminiErrorKind, SpyglassResult};
use spyglass_interface::ModelDiscovery;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Models tried in order when picking a default for the page.
///
/// The scan falls back to the first listed generation model when none of
/// these are served.
pub const DEFAULT_MODEL_PREFERENCE: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash",
];

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const LIST_TIMEOUT_SECS: u64 = 15;
const PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelListing {
    #[serde(default)]
    models: Vec<ModelEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

/// Read-only view of the models the API key can reach.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ModelCatalog {
    /// Create a catalog reading the key from `GOOGLE_API_KEY`.
    pub fn new() -> SpyglassResult<Self> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::from_key(api_key)
    }

    /// Create a catalog from an explicit API key.
    pub fn from_key(api_key: impl Into<String>) -> SpyglassResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(LIST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the catalog at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> SpyglassResult<ModelListing> {
        let url = format!("{}/v1beta/models", self.base_url);

        let mut query = vec![("key", self.api_key.as_str()), ("pageSize", PAGE_SIZE)];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        response.json::<ModelListing>().await.map_err(|e| {
            GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Failed to decode model listing: {}",
                e
            )))
            .into()
        })
    }
}

#[async_trait]
impl ModelDiscovery for ModelCatalog {
    async fn list_generation_models(&self) -> SpyglassResult<Vec<String>> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let listing = self.fetch_page(page_token.as_deref()).await?;

            for entry in listing.models {
                if entry
                    .supported_generation_methods
                    .iter()
                    .any(|m| m == "generateContent")
                {
                    // The API reports names as "models/<id>"
                    names.push(entry.name.trim_start_matches("models/").to_string());
                }
            }

            match listing.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = names.len(), "listed generation models");
        Ok(names)
    }
}

/// Pick a working model from a catalog listing.
///
/// Scans `preferred` in order and returns the first identifier the listing
/// carries; when none match, settles for the first listed model. Returns
/// `None` only when the listing is empty.
///
/// # Examples
///
/// ```
/// use spyglass_models::detect_model;
///
/// let available = vec![
///     "gemini-2.0-flash".to_string(),
///     "gemini-2.5-flash".to_string(),
/// ];
/// let preferred = vec!["gemini-2.5-flash".to_string()];
///
/// assert_eq!(detect_model(&available, &preferred), Some("gemini-2.5-flash".to_string()));
/// ```
pub fn detect_model(available: &[String], preferred: &[String]) -> Option<String> {
    for want in preferred {
        if available.iter().any(|have| have == want) {
            return Some(want.clone());
        }
    }
    available.first().cloned()
}
