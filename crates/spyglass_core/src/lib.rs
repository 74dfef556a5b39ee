//! Core data types for the Spyglass marketing studio.
//!
//! This crate provides the foundation data types used across all Spyglass
//! interfaces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ad;
mod brief;
mod chapter;
mod message;
mod request;
mod role;
mod topic;

pub use ad::AdCopy;
pub use brief::AudienceBrief;
pub use chapter::Chapter;
pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use topic::{TOPIC_MAX_CHARS, truncate_topic};
