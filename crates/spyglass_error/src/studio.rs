//! Studio workflow error types.

/// Specific error conditions for studio operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StudioErrorKind {
    /// Operation requires a topic that has not been set
    #[display("Set a topic before running '{}'", _0)]
    MissingTopic(String),
    /// Model response held no parseable audience brief
    #[display("Could not extract an audience brief: {}", _0)]
    BriefExtraction(String),
    /// Model produced no usable text for an operation
    #[display("Model returned nothing for '{}'", _0)]
    EmptyGeneration(String),
}

/// Studio error with source location tracking.
///
/// # Examples
///
/// ```
/// use spyglass_error::{StudioError, StudioErrorKind};
///
/// let err = StudioError::new(StudioErrorKind::MissingTopic("outline".into()));
/// assert!(format!("{}", err).contains("topic"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Studio Error: {} at line {} in {}", kind, line, file)]
pub struct StudioError {
    /// The specific error condition
    pub kind: StudioErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StudioError {
    /// Create a new StudioError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StudioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
