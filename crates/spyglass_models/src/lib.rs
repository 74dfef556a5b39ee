//! LLM provider integration for Spyglass.
//!
//! This crate drives text generation through the Gemini API. It keeps one
//! paced client per model name, discovers which models the account can use,
//! and cascades a request across fallback models when the active one runs
//! out of quota or disappears.
//!
//! # Example
//!
//! ```no_run
//! use spyglass_models::{FallbackGenerator, GeminiClient};
//! use spyglass_interface::TextGenerator;
//! use spyglass_core::GenerateRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let cascade = FallbackGenerator::new(client, vec!["gemini-2.0-flash".to_string()]);
//! let request = GenerateRequest::from_prompt("Describe a lighthouse at dusk.");
//! let response = cascade.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod fallback;
mod gemini;
mod pacer;

pub use catalog::{DEFAULT_MODEL_PREFERENCE, ModelCatalog, detect_model};
pub use fallback::FallbackGenerator;
pub use gemini::{DEFAULT_MODEL, GeminiClient, GeminiResult};
pub use pacer::{Pacer, PacerGuard, PacingConfig};
