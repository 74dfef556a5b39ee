//! Scraped ad copy.

use serde::{Deserialize, Serialize};

/// One piece of ad copy pulled from an ad library.
///
/// # Examples
///
/// ```
/// use spyglass_core::AdCopy;
///
/// let ad = AdCopy::new("Lose 10lbs in 30 days", Some("FitLife".to_string()));
/// assert_eq!(ad.body, "Lose 10lbs in 30 days");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    /// The ad's primary text
    pub body: String,
    /// Name of the page or advertiser running the ad, when reported
    pub page_name: Option<String>,
}

impl AdCopy {
    /// Create a new ad copy entry.
    pub fn new(body: impl Into<String>, page_name: Option<String>) -> Self {
        Self {
            body: body.into(),
            page_name,
        }
    }
}
