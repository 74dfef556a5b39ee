//! Speech synthesis error types.

/// Specific error conditions for speech synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// Input text was empty or whitespace
    #[display("Speech input text cannot be empty")]
    EmptyText,
    /// HTTP transport failed
    #[display("Speech request failed: {}", _0)]
    Http(String),
    /// Endpoint answered with a non-success status
    #[display("Speech endpoint returned HTTP {}", _0)]
    UnexpectedStatus(u16),
    /// Endpoint answered with no audio bytes
    #[display("Speech endpoint returned no audio")]
    EmptyAudio,
}

/// Speech error with source location tracking.
///
/// # Examples
///
/// ```
/// use spyglass_error::{SpeechError, SpeechErrorKind};
///
/// let err = SpeechError::new(SpeechErrorKind::EmptyText);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The specific error condition
    pub kind: SpeechErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new SpeechError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
