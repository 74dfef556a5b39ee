//! Session state and generation operations for Spyglass.
//!
//! The studio turns a topic and audience into funnel content: audience
//! profiling, chapter outlines and drafts, cover-art prompts, ad copy,
//! landing pages, and upsell / order-bump offers. Drafted chapters
//! accumulate on an in-memory [`Session`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
pub mod prompts;
mod session;
mod studio;

pub use extraction::{extract_json_object, parse_brief, strip_code_fence};
pub use session::Session;
pub use studio::Studio;
