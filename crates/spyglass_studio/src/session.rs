//! In-memory working state for one drafting session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spyglass_core::{AudienceBrief, Chapter, truncate_topic};
use uuid::Uuid;

/// Everything a marketer accumulates while drafting one funnel.
///
/// Sessions live only in memory and disappear when the process exits.
/// There is no uniqueness or size bound on the chapter list; chapters stay
/// in the order they were drafted.
///
/// # Examples
///
/// ```
/// use spyglass_studio::Session;
///
/// let mut session = Session::new();
/// session.set_topic("Intermittent fasting for busy parents");
/// assert!(session.topic.is_some());
///
/// session.reset();
/// assert!(session.topic.is_none());
/// assert!(session.chapters.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Stable identifier, kept across resets.
    pub id: Uuid,
    /// Subject being written about, capped at the topic length limit.
    pub topic: Option<String>,
    /// Raw audience-profiling reply from the model.
    pub audience: Option<String>,
    /// Parsed audience brief, when profiling succeeded.
    pub brief: Option<AudienceBrief>,
    /// Drafted chapters in insertion order.
    pub chapters: Vec<Chapter>,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Open a fresh session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: None,
            audience: None,
            brief: None,
            chapters: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Store the topic, truncated to the topic length cap.
    pub fn set_topic(&mut self, topic: &str) {
        self.topic = Some(truncate_topic(topic));
    }

    /// Append a drafted chapter.
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// The audience description later prompts should use: the parsed
    /// brief's audience when profiling succeeded, otherwise the raw reply.
    pub fn audience_line(&self) -> Option<String> {
        self.brief
            .as_ref()
            .map(|b| b.audience().clone())
            .or_else(|| self.audience.clone())
    }

    /// Clear all drafted state. The session id and creation time survive
    /// so open clients keep a valid handle.
    pub fn reset(&mut self) {
        self.topic = None;
        self.audience = None;
        self.brief = None;
        self.chapters.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
