//! Core type definitions for the Spyglass interface.

use serde::{Deserialize, Serialize};

/// A single chunk from a streaming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Incremental text content.
    pub content: String,
    /// Whether this is the final chunk.
    pub is_final: bool,
    /// Optional finish reason if final.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Why generation stopped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

/// Parameters for an ad-library scrape.
///
/// # Examples
///
/// ```
/// use spyglass_interface::ScrapeQuery;
///
/// let query = ScrapeQuery::new("keto diet", "US");
/// assert_eq!(query.limit, ScrapeQuery::DEFAULT_LIMIT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeQuery {
    /// Keyword to search the ad library for.
    pub keyword: String,
    /// Two-letter country code scoping the search.
    pub country: String,
    /// Maximum number of ads to return.
    #[serde(default = "ScrapeQuery::default_limit")]
    pub limit: usize,
}

impl ScrapeQuery {
    /// Ads returned per scrape unless the caller asks otherwise.
    pub const DEFAULT_LIMIT: usize = 10;

    /// Create a query with the default result limit.
    pub fn new(keyword: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            country: country.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    fn default_limit() -> usize {
        Self::DEFAULT_LIMIT
    }
}
