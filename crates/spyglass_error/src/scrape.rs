//! Ad-library scraper error types.

/// Specific error conditions for ad-library scraping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScrapeErrorKind {
    /// API token not found in environment
    #[display("APIFY_API_TOKEN environment variable not set")]
    MissingToken,
    /// Keyword was empty or whitespace
    #[display("Scrape keyword cannot be empty")]
    EmptyKeyword,
    /// Actor run exceeded its deadline
    #[display("Ad scrape timed out after {} seconds", _0)]
    Timeout(u64),
    /// HTTP transport failed
    #[display("Scrape request failed: {}", _0)]
    Http(String),
    /// Actor answered with a non-success status
    #[display("Actor run returned HTTP {}: {}", status_code, message)]
    UnexpectedStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body preview
        message: String,
    },
    /// Dataset items did not match the expected shape
    #[display("Unexpected dataset payload: {}", _0)]
    Payload(String),
}

/// Scraper error with source location tracking.
///
/// # Examples
///
/// ```
/// use spyglass_error::{ScrapeError, ScrapeErrorKind};
///
/// let err = ScrapeError::new(ScrapeErrorKind::EmptyKeyword);
/// assert!(format!("{}", err).contains("keyword"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scrape Error: {} at line {} in {}", kind, line, file)]
pub struct ScrapeError {
    /// The specific error condition
    pub kind: ScrapeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScrapeError {
    /// Create a new ScrapeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScrapeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
