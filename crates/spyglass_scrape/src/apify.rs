//! Apify ad-library actor client.
//!
//! Runs an Apify actor synchronously and reads ad copy out of its dataset:
//!
//! POST `https://api.apify.com/v2/acts/{actor}/run-sync-get-dataset-items?token=…`
//! Request: `{"searchTerms": ["…"], "country": "US", "count": 10}` (JSON)
//! Response: JSON array of dataset items whose shape varies by actor version.
//!
//! Scrapes are best-effort seeding for prompts. A failed run is reported to
//! the caller and abandoned; there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use spyglass_core::AdCopy;
use spyglass_error::{ScrapeError, ScrapeErrorKind, SpyglassResult};
use spyglass_interface::{AdLibrary, ScrapeQuery};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Actor runs are cut off after this many seconds.
pub const SCRAPE_TIMEOUT_SECS: u64 = 60;

/// Longest error-body preview carried into an error message.
const BODY_PREVIEW_CHARS: usize = 200;

/// Actor run input, matching the ad-library scraper's input schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActorRunInput {
    search_terms: Vec<String>,
    country: String,
    count: usize,
}

/// Apify client configuration.
#[derive(Debug, Clone)]
pub struct ApifyClientConfig {
    /// Actor to run, in `owner~name` form.
    pub actor: String,
    /// Apify API base URL.
    pub base_url: String,
}

impl Default for ApifyClientConfig {
    fn default() -> Self {
        Self {
            actor: "curious_coder~facebook-ads-library-scraper".to_string(),
            base_url: "https://api.apify.com".to_string(),
        }
    }
}

impl ApifyClientConfig {
    /// Config for a specific actor, keeping the default base URL.
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            ..Default::default()
        }
    }

    /// Override the API base URL, mainly so tests can point at a stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the Apify run-sync-get-dataset-items endpoint.
///
/// # Examples
///
/// ```no_run
/// use spyglass_scrape::ApifyClient;
/// use spyglass_interface::{AdLibrary, ScrapeQuery};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApifyClient::new()?;
/// let ads = client.scrape(&ScrapeQuery::new("keto diet", "US")).await?;
/// for ad in &ads {
///     println!("{}", ad.body);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApifyClient {
    client: Client,
    token: String,
    config: ApifyClientConfig,
}

impl std::fmt::Debug for ApifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApifyClient")
            .field("actor", &self.config.actor)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl ApifyClient {
    /// Create a client with the token from `APIFY_API_TOKEN`.
    #[instrument]
    pub fn new() -> SpyglassResult<Self> {
        let token = std::env::var("APIFY_API_TOKEN")
            .map_err(|_| ScrapeError::new(ScrapeErrorKind::MissingToken))?;
        Self::from_token(token, ApifyClientConfig::default())
    }

    /// Create a client with an explicit token and configuration.
    pub fn from_token(
        token: impl Into<String>,
        config: ApifyClientConfig,
    ) -> SpyglassResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SCRAPE_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScrapeError::new(ScrapeErrorKind::Http(e.to_string())))?;

        Ok(Self {
            client,
            token: token.into(),
            config,
        })
    }

    fn run_url(&self) -> String {
        format!(
            "{}/v2/acts/{}/run-sync-get-dataset-items",
            self.config.base_url, self.config.actor
        )
    }
}

#[async_trait]
impl AdLibrary for ApifyClient {
    #[instrument(skip(self), fields(actor = %self.config.actor))]
    async fn scrape(&self, query: &ScrapeQuery) -> SpyglassResult<Vec<AdCopy>> {
        if query.keyword.trim().is_empty() {
            return Err(ScrapeError::new(ScrapeErrorKind::EmptyKeyword).into());
        }

        let input = ActorRunInput {
            search_terms: vec![query.keyword.clone()],
            country: query.country.clone(),
            count: query.limit,
        };

        debug!(
            keyword = %query.keyword,
            country = %query.country,
            limit = query.limit,
            "starting actor run"
        );

        let response = self
            .client
            .post(self.run_url())
            .query(&[("token", self.token.as_str())])
            .json(&input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScrapeError::new(ScrapeErrorKind::Timeout(SCRAPE_TIMEOUT_SECS))
                } else if e.is_connect() {
                    ScrapeError::new(ScrapeErrorKind::Http(format!(
                        "cannot reach actor endpoint: {e}"
                    )))
                } else {
                    ScrapeError::new(ScrapeErrorKind::Http(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::new(ScrapeErrorKind::UnexpectedStatus {
                status_code: status.as_u16(),
                message: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            })
            .into());
        }

        let items: Vec<Value> = response
            .json()
            .await
            .map_err(|e| ScrapeError::new(ScrapeErrorKind::Payload(e.to_string())))?;

        let ads = collect_ads(&items, query.limit);
        info!(
            items = items.len(),
            ads = ads.len(),
            "actor run completed"
        );
        Ok(ads)
    }
}

/// Pull at most `limit` ads out of raw dataset items, skipping items with
/// no usable body text.
fn collect_ads(items: &[Value], limit: usize) -> Vec<AdCopy> {
    items
        .iter()
        .filter_map(|item| {
            let body = dig_body(item)?;
            Some(AdCopy::new(body, dig_page_name(item)))
        })
        .take(limit)
        .collect()
}

/// Find the ad's primary text across the item shapes different actor
/// versions emit.
fn dig_body(item: &Value) -> Option<String> {
    // Current shape: snapshot.body.text
    if let Some(text) = item
        .pointer("/snapshot/body/text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(text.to_string());
    }

    // Carousel ads: first card that carries body text
    if let Some(cards) = item.pointer("/snapshot/cards").and_then(Value::as_array) {
        for card in cards {
            if let Some(text) = card
                .get("body")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
            {
                return Some(text.to_string());
            }
        }
    }

    // Older flat shapes
    for key in ["adText", "text"] {
        if let Some(text) = item
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            return Some(text.to_string());
        }
    }

    None
}

/// Advertiser page name, when the item reports one.
fn dig_page_name(item: &Value) -> Option<String> {
    for pointer in ["/snapshot/page_name", "/page_name", "/pageName"] {
        if let Some(name) = item
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            return Some(name.to_string());
        }
    }
    None
}
