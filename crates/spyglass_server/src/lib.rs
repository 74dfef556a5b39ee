//! HTTP surface for the Spyglass studio.
//!
//! Serves a JSON API plus an embedded single-page UI over axum: session
//! management, audience profiling, chapter drafting (with an SSE streaming
//! variant), one-shot asset generation, ad-library scraping, speech
//! synthesis, and document downloads.
//!
//! Backends arrive as trait objects ([`spyglass_interface`] ports), so the
//! server never touches provider crates directly and tests can swap in
//! scripted fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, SessionStore};
