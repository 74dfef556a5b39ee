//! Trait definitions for the Spyglass marketing studio.
//!
//! This crate provides the core traits that define the seams between the
//! studio workflow and its external services: text generation, model
//! discovery, ad-library scraping, and speech synthesis.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{AdLibrary, ModelDiscovery, SpeechSynthesizer, Streaming, TextGenerator};
pub use types::{FinishReason, ScrapeQuery, StreamChunk};
