//! The generation operations behind each studio action.

use futures_util::stream::Stream;
use spyglass_core::{AdCopy, AudienceBrief, Chapter, GenerateRequest};
use spyglass_error::{SpyglassResult, StudioError, StudioErrorKind};
use spyglass_interface::{StreamChunk, Streaming, TextGenerator};
use std::pin::Pin;
use tracing::{debug, info};

use crate::extraction::{parse_brief, strip_code_fence};
use crate::prompts;
use crate::session::Session;

/// Drives every generation operation against one text generator.
///
/// The studio owns no session storage; callers pass the session they want
/// read or mutated. Each operation builds its prompt, runs the generator,
/// and hands back the text.
///
/// # Examples
///
/// ```no_run
/// use spyglass_studio::{Session, Studio};
/// use spyglass_models::{FallbackGenerator, GeminiClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = FallbackGenerator::new(GeminiClient::new()?, vec![]);
/// let studio = Studio::new(generator);
///
/// let mut session = Session::new();
/// session.set_topic("container gardening on balconies");
/// let brief = studio.profile_audience(&mut session).await?;
/// println!("writing for: {}", brief.audience());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Studio<G> {
    generator: G,
}

impl<G> Studio<G> {
    /// Wrap a generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Access the wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: TextGenerator> Studio<G> {
    /// Run one prompt and return the trimmed reply text.
    async fn run(&self, operation: &str, prompt: String) -> SpyglassResult<String> {
        debug!(operation, prompt_chars = prompt.chars().count(), "running generation");

        let request = GenerateRequest::from_prompt(prompt);
        let response = self.generator.generate(&request).await?;

        let text = response.text().trim().to_string();
        if text.is_empty() {
            return Err(StudioError::new(StudioErrorKind::EmptyGeneration(
                operation.to_string(),
            ))
            .into());
        }

        info!(operation, reply_chars = text.chars().count(), "generation completed");
        Ok(text)
    }

    /// Profile the market for the session's topic and store both the raw
    /// reply and the parsed brief on the session.
    pub async fn profile_audience(&self, session: &mut Session) -> SpyglassResult<AudienceBrief> {
        let topic = required_topic("profile_audience", session.topic.as_deref())?;

        let raw = self
            .run("profile_audience", prompts::audience_profile(&topic))
            .await?;
        let brief = parse_brief(&raw)?;

        session.audience = Some(raw);
        session.brief = Some(brief.clone());
        Ok(brief)
    }

    /// Produce a chapter outline for the session's topic.
    pub async fn outline(&self, session: &Session) -> SpyglassResult<String> {
        let topic = required_topic("outline", session.topic.as_deref())?;
        let audience = session.audience_line();

        self.run(
            "outline",
            prompts::chapter_outline(&topic, audience.as_deref()),
        )
        .await
    }

    /// Draft one chapter and append it to the session's chapter list.
    pub async fn draft_chapter(
        &self,
        session: &mut Session,
        title: &str,
    ) -> SpyglassResult<Chapter> {
        let topic = required_topic("draft_chapter", session.topic.as_deref())?;
        let audience = session.audience_line();

        let body = self
            .run(
                "draft_chapter",
                prompts::draft_chapter(&topic, audience.as_deref(), title),
            )
            .await?;

        let chapter = Chapter::new(title, body);
        session.add_chapter(chapter.clone());
        Ok(chapter)
    }

    /// Generate a cover-art prompt for an image model.
    pub async fn cover_prompt(
        &self,
        topic: &str,
        audience: Option<&str>,
    ) -> SpyglassResult<String> {
        let topic = required_topic("cover_prompt", Some(topic))?;
        self.run("cover_prompt", prompts::cover_prompt(&topic, audience))
            .await
    }

    /// Generate short-form ad copy, optionally seeded with scraped ads.
    pub async fn ad_copy(
        &self,
        topic: &str,
        audience: Option<&str>,
        seeds: &[AdCopy],
    ) -> SpyglassResult<String> {
        let topic = required_topic("ad_copy", Some(topic))?;
        self.run("ad_copy", prompts::ad_copy(&topic, audience, seeds))
            .await
    }

    /// Generate a landing page. A markdown fence wrapping the model's HTML
    /// is stripped; everything else passes through verbatim.
    pub async fn landing_page(
        &self,
        topic: &str,
        audience: Option<&str>,
        seeds: &[AdCopy],
    ) -> SpyglassResult<String> {
        let topic = required_topic("landing_page", Some(topic))?;
        let reply = self
            .run("landing_page", prompts::landing_page(&topic, audience, seeds))
            .await?;
        Ok(strip_code_fence(&reply))
    }

    /// Generate post-purchase upsell copy.
    pub async fn upsell(&self, topic: &str, audience: Option<&str>) -> SpyglassResult<String> {
        let topic = required_topic("upsell", Some(topic))?;
        self.run("upsell", prompts::upsell(&topic, audience)).await
    }

    /// Generate checkout order-bump copy.
    pub async fn order_bump(&self, topic: &str, audience: Option<&str>) -> SpyglassResult<String> {
        let topic = required_topic("order_bump", Some(topic))?;
        self.run("order_bump", prompts::order_bump(&topic, audience))
            .await
    }
}

impl<G: Streaming> Studio<G> {
    /// Open a chapter-draft stream. The caller owns collecting the chunks
    /// and appending the finished chapter to its session.
    pub async fn draft_chapter_stream(
        &self,
        topic: &str,
        audience: Option<&str>,
        title: &str,
    ) -> SpyglassResult<Pin<Box<dyn Stream<Item = SpyglassResult<StreamChunk>> + Send>>> {
        let topic = required_topic("draft_chapter", Some(topic))?;
        let prompt = prompts::draft_chapter(&topic, audience, title);

        debug!(operation = "draft_chapter", streaming = true, "opening generation stream");
        let request = GenerateRequest::from_prompt(prompt);
        self.generator.generate_stream(&request).await
    }
}

/// Reject a missing or blank topic before building any prompt.
fn required_topic(operation: &str, topic: Option<&str>) -> SpyglassResult<String> {
    match topic {
        Some(topic) if !topic.trim().is_empty() => Ok(topic.trim().to_string()),
        _ => Err(StudioError::new(StudioErrorKind::MissingTopic(operation.to_string())).into()),
    }
}
