//! Error types for the Spyglass library.
//!
//! This crate provides the foundation error types used throughout the Spyglass
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use spyglass_error::{SpyglassResult, HttpError};
//!
//! fn fetch_data() -> SpyglassResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;
mod json;
mod config;
mod builder;
mod gemini;
mod scrape;
mod speech;
mod export;
mod studio;
mod server;
mod error;

pub use http::HttpError;
pub use json::JsonError;
pub use config::ConfigError;
pub use builder::{BuilderError, BuilderErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use scrape::{ScrapeError, ScrapeErrorKind};
pub use speech::{SpeechError, SpeechErrorKind};
pub use export::{ExportError, ExportErrorKind};
pub use studio::{StudioError, StudioErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use error::{SpyglassError, SpyglassErrorKind, SpyglassResult};
