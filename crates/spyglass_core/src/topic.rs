//! Topic text and its length cap.

/// Maximum number of characters a topic may carry.
///
/// Longer input is silently cut; the page surfaces the cap in its UI copy
/// rather than rejecting the paste.
pub const TOPIC_MAX_CHARS: usize = 800;

/// Truncate topic text to [`TOPIC_MAX_CHARS`] characters.
///
/// Counts `char`s rather than bytes so multi-byte input is never split
/// mid-character. Applying the function twice yields the same result.
///
/// # Examples
///
/// ```
/// use spyglass_core::{TOPIC_MAX_CHARS, truncate_topic};
///
/// let long = "x".repeat(1000);
/// let topic = truncate_topic(&long);
/// assert_eq!(topic.chars().count(), TOPIC_MAX_CHARS);
/// assert!(long.starts_with(&topic));
/// ```
pub fn truncate_topic(input: &str) -> String {
    input.chars().take(TOPIC_MAX_CHARS).collect()
}
