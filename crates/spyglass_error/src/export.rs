//! Document export error types.

/// Specific error conditions for document export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExportErrorKind {
    /// No chapters available to export
    #[display("Nothing to export: no chapters have been drafted")]
    NoChapters,
    /// Failed to assemble the document package
    #[display("Failed to package document: {}", _0)]
    Packaging(String),
    /// Failed to write the document to disk
    #[display("Failed to write document: {}", _0)]
    Io(String),
}

/// Export error with source location tracking.
///
/// # Examples
///
/// ```
/// use spyglass_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::NoChapters);
/// assert!(format!("{}", err).contains("no chapters"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The specific error condition
    pub kind: ExportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExportError {
    /// Create a new ExportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
