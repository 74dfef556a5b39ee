//! Ad-library scraping for Spyglass.
//!
//! Wraps an Apify actor that crawls a public ads library, turning a keyword
//! and country code into a bounded list of competitor ad copy used to seed
//! generation prompts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod apify;

pub use apify::{ApifyClient, ApifyClientConfig, SCRAPE_TIMEOUT_SECS};
