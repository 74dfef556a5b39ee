//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ExportError, GeminiError, HttpError, JsonError, ScrapeError,
    ServerError, SpeechError, StudioError,
};

/// This is the foundation error enum. Each Spyglass crate contributes the
/// variant covering its own failure domain.
///
/// # Examples
///
/// ```
/// use spyglass_error::{SpyglassError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: SpyglassError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SpyglassErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Ad-library scraper error
    #[from(ScrapeError)]
    Scrape(ScrapeError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Document export error
    #[from(ExportError)]
    Export(ExportError),
    /// Studio workflow error
    #[from(StudioError)]
    Studio(StudioError),
    /// Web server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Spyglass error with kind discrimination.
///
/// # Examples
///
/// ```
/// use spyglass_error::{SpyglassError, SpyglassResult, ConfigError};
///
/// fn might_fail() -> SpyglassResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Spyglass Error: {}", _0)]
pub struct SpyglassError(Box<SpyglassErrorKind>);

impl SpyglassError {
    /// Create a new error from a kind.
    pub fn new(kind: SpyglassErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SpyglassErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SpyglassErrorKind
impl<T> From<T> for SpyglassError
where
    T: Into<SpyglassErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Spyglass operations.
///
/// # Examples
///
/// ```
/// use spyglass_error::{SpyglassResult, HttpError};
///
/// fn fetch_data() -> SpyglassResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type SpyglassResult<T> = std::result::Result<T, SpyglassError>;
