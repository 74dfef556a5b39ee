//! Audience brief extracted from model output.

use serde::{Deserialize, Serialize};

/// Structured audience profile.
///
/// Produced by asking the model for a fixed-shape JSON object; the three
/// keys here are the contract the extraction prompt demands.
///
/// # Examples
///
/// ```
/// use spyglass_core::AudienceBrief;
///
/// let json = r#"{
///     "pain_point": "No time to cook",
///     "promise": "Healthy meals in 15 minutes",
///     "audience": "Busy professionals"
/// }"#;
/// let brief: AudienceBrief = serde_json::from_str(json).unwrap();
/// assert_eq!(brief.promise(), "Healthy meals in 15 minutes");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters, Default,
)]
pub struct AudienceBrief {
    /// The dominant problem the audience wants solved
    pain_point: String,
    /// The transformation the offer promises
    promise: String,
    /// Who the offer is for
    audience: String,
}

impl AudienceBrief {
    /// Create a brief from its three parts.
    pub fn new(
        pain_point: impl Into<String>,
        promise: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            pain_point: pain_point.into(),
            promise: promise.into(),
            audience: audience.into(),
        }
    }
}
