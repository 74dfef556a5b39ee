//! One-shot generation command handler.

use super::commands::GenerateKind;
use futures_util::StreamExt;
use spyglass::config::SpyglassConfig;
use spyglass::runtime::{build_ad_library, build_generator};
use spyglass::{AdCopy, ScrapeQuery, SpyglassResult, Studio};
use std::io::Write;
use tracing::{info, warn};

/// Title used when the chapter kind is generated without `--title`.
const DEFAULT_CHAPTER_TITLE: &str = "Chapter 1";

/// Handle the `generate` command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    kind: GenerateKind,
    topic: &str,
    audience: Option<&str>,
    title: Option<&str>,
    seed_keyword: Option<&str>,
    country: &str,
    stream: bool,
) -> SpyglassResult<()> {
    let config = SpyglassConfig::load()?;
    let studio = Studio::new(build_generator(&config).await?);

    // Only the ad and landing prompts take scraped seeds.
    let seeds = match kind {
        GenerateKind::Ads | GenerateKind::Landing => {
            scrape_seeds(&config, seed_keyword, country).await
        }
        _ => Vec::new(),
    };

    match kind {
        GenerateKind::Chapter => {
            let title = title.unwrap_or(DEFAULT_CHAPTER_TITLE);
            let mut chunks = studio.draft_chapter_stream(topic, audience, title).await?;

            let mut body = String::new();
            if stream {
                println!("# {title}\n");
            }
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk?;
                if chunk.content.is_empty() {
                    continue;
                }
                if stream {
                    print!("{}", chunk.content);
                    let _ = std::io::stdout().flush();
                }
                body.push_str(&chunk.content);
            }
            if stream {
                println!();
            } else {
                println!("# {title}\n\n{body}");
            }
        }
        GenerateKind::Cover => println!("{}", studio.cover_prompt(topic, audience).await?),
        GenerateKind::Ads => println!("{}", studio.ad_copy(topic, audience, &seeds).await?),
        GenerateKind::Landing => {
            println!("{}", studio.landing_page(topic, audience, &seeds).await?)
        }
        GenerateKind::Upsell => println!("{}", studio.upsell(topic, audience).await?),
        GenerateKind::Bump => println!("{}", studio.order_bump(topic, audience).await?),
    }

    Ok(())
}

/// Scrape competitor ads for seeding, degrading to no seeds on any failure.
async fn scrape_seeds(
    config: &SpyglassConfig,
    keyword: Option<&str>,
    country: &str,
) -> Vec<AdCopy> {
    let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
        return Vec::new();
    };

    let library = match build_ad_library(&config.scrape) {
        Ok(Some(library)) => library,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "scraper unavailable, generating without seeds");
            return Vec::new();
        }
    };

    match library.scrape(&ScrapeQuery::new(keyword, country)).await {
        Ok(ads) => {
            info!(count = ads.len(), "seeded generation with scraped ads");
            ads
        }
        Err(err) => {
            warn!(error = %err, "seed scrape failed, generating without seeds");
            Vec::new()
        }
    }
}
