//! Chapter types for drafted e-book content.

use serde::{Deserialize, Serialize};

/// A drafted e-book chapter.
///
/// Chapters accumulate in the order they were drafted; export surfaces
/// preserve that order.
///
/// # Examples
///
/// ```
/// use spyglass_core::Chapter;
///
/// let chapter = Chapter::new("Why diets fail", "Most diets fail because...");
/// assert_eq!(chapter.title, "Why diets fail");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter heading
    pub title: String,
    /// Chapter body text
    pub body: String,
}

impl Chapter {
    /// Create a new chapter.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
