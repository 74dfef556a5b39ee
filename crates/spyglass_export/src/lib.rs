//! Chapter export for Spyglass.
//!
//! Serializes the drafted chapter list into downloadable artifacts: a
//! word-processor document, a Markdown digest, and a verbatim HTML wrapper
//! for model-generated landing pages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod docx;
mod html;
mod markdown;

pub use docx::{DOCX_FILENAME, DocxDocument, build_docx};
pub use html::{LANDING_FILENAME, LandingPageFile};
pub use markdown::{MARKDOWN_FILENAME, markdown_digest};
