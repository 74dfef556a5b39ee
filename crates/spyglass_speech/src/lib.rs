//! Text-to-speech for Spyglass.
//!
//! Turns generated copy into MP3 narration through an HTTP speech endpoint,
//! chunking long text to fit the endpoint's per-request length cap.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod translate;

pub use chunk::{CHUNK_MAX_CHARS, chunk_text};
pub use translate::{TranslateTts, TranslateTtsConfig};
