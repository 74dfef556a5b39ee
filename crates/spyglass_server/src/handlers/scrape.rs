//! Ad-library scraping.

use crate::error::ApiError;
use crate::handlers::non_blank;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use spyglass_core::AdCopy;
use spyglass_interface::ScrapeQuery;
use std::sync::Arc;
use tracing::info;

/// Scrape parameters.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    /// Keyword to search the ad library for.
    pub keyword: String,
    /// Two-letter country code scoping the search.
    pub country: String,
    /// Cap on returned ads; the scraper's default applies when absent.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Scraped ads, already bounded and cleaned.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    /// Ad copy in the order the library returned it.
    pub ads: Vec<AdCopy>,
}

/// Scrape the ad library for a keyword in a country.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let keyword = non_blank(&req.keyword, "keyword")?;
    let country = non_blank(&req.country, "country")?;

    let library = state.ad_library.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "ad scraping is not configured: set APIFY_API_TOKEN".to_string(),
        )
    })?;

    let mut query = ScrapeQuery::new(keyword, country);
    if let Some(limit) = req.limit {
        query.limit = limit;
    }

    let ads = library.scrape(&query).await?;
    info!(keyword = %query.keyword, country = %query.country, count = ads.len(), "scrape finished");

    Ok(Json(ScrapeResponse { ads }))
}
