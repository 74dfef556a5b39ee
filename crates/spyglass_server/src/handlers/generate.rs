//! One-shot asset generation.
//!
//! These endpoints take their inputs in the request body instead of a
//! session, so a caller can generate ad copy or a landing page without
//! drafting a book first. Ads and landing pages accept optional scrape
//! parameters; a failed seed scrape degrades to unseeded generation.

use crate::error::ApiError;
use crate::handlers::non_blank;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use spyglass_core::AdCopy;
use spyglass_interface::ScrapeQuery;
use tracing::{info, warn};

use std::sync::Arc;

/// Country assumed when a seeded request does not name one.
const DEFAULT_COUNTRY: &str = "US";

/// Inputs shared by every one-shot generation endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// What the product is about.
    pub topic: String,
    /// Audience line carried into the prompt, when known.
    #[serde(default)]
    pub audience: Option<String>,
    /// When set, scrape the ad library for this keyword and seed the prompt.
    #[serde(default)]
    pub seed_keyword: Option<String>,
    /// Country scope for the seed scrape.
    #[serde(default)]
    pub country: Option<String>,
    /// Cap on scraped seed ads.
    #[serde(default)]
    pub seed_limit: Option<usize>,
}

/// A single generated asset.
#[derive(Debug, Serialize)]
pub struct GeneratedText {
    /// The model's reply.
    pub text: String,
}

/// Scrape competitor ads for prompt seeding, or come back empty.
///
/// Seeding is advisory: a missing scraper or a failed scrape logs a warning
/// and generation continues unseeded.
async fn seed_ads(state: &AppState, body: &GenerateBody) -> Vec<AdCopy> {
    let Some(keyword) = body
        .seed_keyword
        .as_deref()
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
    else {
        return Vec::new();
    };

    let Some(library) = state.ad_library.as_ref() else {
        warn!(keyword, "no ad scraper configured, generating without seeds");
        return Vec::new();
    };

    let mut query = ScrapeQuery::new(keyword, body.country.as_deref().unwrap_or(DEFAULT_COUNTRY));
    if let Some(limit) = body.seed_limit {
        query.limit = limit;
    }

    match library.scrape(&query).await {
        Ok(ads) => {
            info!(keyword, count = ads.len(), "seeded generation from scraped ads");
            ads
        }
        Err(err) => {
            warn!(keyword, error = %err, "seed scrape failed, generating without seeds");
            Vec::new()
        }
    }
}

/// Generate a cover-art prompt for an image model.
pub async fn cover(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedText>, ApiError> {
    let topic = non_blank(&body.topic, "topic")?;
    let text = state
        .studio
        .cover_prompt(&topic, body.audience.as_deref())
        .await?;
    Ok(Json(GeneratedText { text }))
}

/// Generate short-form ad copy, optionally seeded with scraped ads.
pub async fn ads(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedText>, ApiError> {
    let topic = non_blank(&body.topic, "topic")?;
    let seeds = seed_ads(&state, &body).await;
    let text = state
        .studio
        .ad_copy(&topic, body.audience.as_deref(), &seeds)
        .await?;
    Ok(Json(GeneratedText { text }))
}

/// Generate a single-file landing page, optionally seeded with scraped ads.
pub async fn landing(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedText>, ApiError> {
    let topic = non_blank(&body.topic, "topic")?;
    let seeds = seed_ads(&state, &body).await;
    let text = state
        .studio
        .landing_page(&topic, body.audience.as_deref(), &seeds)
        .await?;
    Ok(Json(GeneratedText { text }))
}

/// Generate post-purchase upsell copy.
pub async fn upsell(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedText>, ApiError> {
    let topic = non_blank(&body.topic, "topic")?;
    let text = state
        .studio
        .upsell(&topic, body.audience.as_deref())
        .await?;
    Ok(Json(GeneratedText { text }))
}

/// Generate checkout order-bump copy.
pub async fn order_bump(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedText>, ApiError> {
    let topic = non_blank(&body.topic, "topic")?;
    let text = state
        .studio
        .order_bump(&topic, body.audience.as_deref())
        .await?;
    Ok(Json(GeneratedText { text }))
}
