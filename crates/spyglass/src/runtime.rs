//! Service wiring for the Spyglass binary.
//!
//! Builds the generation cascade, ad-library scraper, speech synthesizer,
//! and model catalog out of a [`SpyglassConfig`] plus environment
//! credentials, and assembles them into the server's shared state.

use crate::config::{ScrapeSection, SpyglassConfig};
use spyglass_error::SpyglassResult;
use spyglass_interface::{AdLibrary, ModelDiscovery, Streaming};
use spyglass_models::{FallbackGenerator, GeminiClient, ModelCatalog, detect_model};
use spyglass_scrape::{ApifyClient, ApifyClientConfig};
use spyglass_server::AppState;
use spyglass_speech::TranslateTts;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the cascading Gemini generator described by the configuration.
///
/// The preference list serves twice: startup detection picks the first
/// listed model the API key can reach as the cascade's primary, and the
/// full list forms the fallback order consulted on quota exhaustion.
/// Detection is best-effort; when the live listing cannot be fetched the
/// client keeps its built-in default model.
pub async fn build_generator(
    config: &SpyglassConfig,
) -> SpyglassResult<FallbackGenerator<GeminiClient>> {
    let client = GeminiClient::new_with_retry(
        Some(config.pacing.clone()),
        config.retry.no_retry,
        config.retry.max_retries,
        config.retry.backoff_ms,
    )?;

    let client = match detect_active_model(&config.models.preference).await {
        Some(model) => {
            info!(model = %model, "detected active model");
            client.with_default_model(model)
        }
        None => client,
    };

    Ok(FallbackGenerator::new(
        client,
        config.models.preference.clone(),
    ))
}

/// Scan the live model listing for the first preferred model it carries.
///
/// Returns `None` when the catalog cannot be built or queried, leaving the
/// caller on its default model.
async fn detect_active_model(preference: &[String]) -> Option<String> {
    let catalog = match ModelCatalog::new() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(error = %err, "model detection skipped");
            return None;
        }
    };

    match catalog.list_generation_models().await {
        Ok(available) => detect_model(&available, preference),
        Err(err) => {
            warn!(error = %err, "model listing failed, keeping the default model");
            None
        }
    }
}

/// Build the ad-library scraper, or `None` when no token is configured.
///
/// A missing `APIFY_API_TOKEN` disables scraping rather than failing
/// startup; generation then runs unseeded and the scrape endpoint reports
/// the service as unavailable.
pub fn build_ad_library(settings: &ScrapeSection) -> SpyglassResult<Option<Arc<dyn AdLibrary>>> {
    let Ok(token) = env::var("APIFY_API_TOKEN") else {
        warn!("APIFY_API_TOKEN is not set, ad scraping disabled");
        return Ok(None);
    };

    let actor_config = match &settings.actor {
        Some(actor) => ApifyClientConfig::new(actor.clone()),
        None => ApifyClientConfig::default(),
    };

    let client = ApifyClient::from_token(token, actor_config)?;
    Ok(Some(Arc::new(client)))
}

/// Assemble the server state from configured backends.
pub async fn build_state(config: &SpyglassConfig) -> SpyglassResult<AppState> {
    let generator = build_generator(config).await?;
    let catalog = ModelCatalog::new()?;
    let ad_library = build_ad_library(&config.scrape)?;
    let speech = TranslateTts::new()?;

    let generator: Arc<dyn Streaming> = Arc::new(generator);
    let catalog: Arc<dyn ModelDiscovery> = Arc::new(catalog);

    Ok(AppState::new(
        generator,
        catalog,
        ad_library,
        Arc::new(speech),
        config.models.preference.clone(),
    ))
}
