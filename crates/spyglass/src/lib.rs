//! Spyglass - Marketing Content Studio
//!
//! Spyglass turns a product topic into funnel-ready marketing content
//! through the Gemini API: e-book chapters, cover-art prompts, ad copy,
//! landing pages, and upsell / order-bump offers, optionally seeded with
//! competitor ads scraped from a public ad library.
//!
//! # Features
//!
//! - **Audience Profiling**: Extracts a pain-point / promise / audience
//!   brief from a topic and reuses it across every asset
//! - **Chapter Drafting**: Outlines and drafts e-book chapters, with a
//!   streaming variant for live display
//! - **Model Fallback**: Cascades requests across alternate Gemini models
//!   when the active one runs out of quota or disappears
//! - **Competitor Seeding**: Scrapes a public ads library through an Apify
//!   actor and folds winning copy into generation prompts
//! - **Speech Preview**: Narrates generated copy as MP3 audio
//! - **Document Export**: Packages chapters as docx or Markdown downloads
//! - **Web Studio**: Serves the whole workflow as a JSON API plus an
//!   embedded single-page UI
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spyglass::{GeminiClient, Studio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = Studio::new(GeminiClient::new()?);
//!
//!     let copy = studio
//!         .ad_copy("Meal prep for busy parents", None, &[])
//!         .await?;
//!     println!("{copy}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Spyglass is organized as a workspace with focused crates:
//!
//! - `spyglass_core` - Core data types (Chapter, AdCopy, etc.)
//! - `spyglass_error` - Error types
//! - `spyglass_interface` - Backend trait definitions
//! - `spyglass_models` - Gemini client, pacing, and the fallback cascade
//! - `spyglass_scrape` - Apify ad-library scraper
//! - `spyglass_speech` - Text-to-speech synthesis
//! - `spyglass_export` - docx / Markdown / landing-page packaging
//! - `spyglass_studio` - Session state and generation operations
//! - `spyglass_server` - axum web server and embedded UI
//!
//! This crate (`spyglass`) re-exports everything for convenience and adds
//! the binary's configuration and service wiring.

pub mod config;
pub mod runtime;

pub use spyglass_core::*;
pub use spyglass_error::*;
pub use spyglass_export::*;
pub use spyglass_interface::*;
pub use spyglass_models::*;
pub use spyglass_scrape::*;
pub use spyglass_server::*;
pub use spyglass_speech::*;
pub use spyglass_studio::*;
