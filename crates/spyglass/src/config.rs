//! TOML configuration for the Spyglass binary.
//!
//! This module provides the settings the CLI and server read at startup.
//! The configuration system supports:
//! - Bundled defaults (include_str! from spyglass.toml)
//! - User overrides (./spyglass.toml or ~/.config/spyglass/spyglass.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use spyglass_error::{ConfigError, SpyglassError, SpyglassResult};
use spyglass_models::{DEFAULT_MODEL_PREFERENCE, PacingConfig};
use tracing::{debug, instrument};

/// HTTP server bind settings.
///
/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 3000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    /// Address the server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the server listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Model selection settings.
///
/// The preference list drives both startup detection (the first listed
/// model the API key can reach becomes the active model) and the fallback
/// cascade consulted when the active model runs out of quota.
///
/// # Example
///
/// ```toml
/// [models]
/// preference = ["gemini-2.5-flash", "gemini-2.0-flash"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelsSection {
    /// Models tried in order, most preferred first
    #[serde(default = "default_preference")]
    pub preference: Vec<String>,
}

fn default_preference() -> Vec<String> {
    DEFAULT_MODEL_PREFERENCE
        .iter()
        .map(|m| m.to_string())
        .collect()
}

impl Default for ModelsSection {
    fn default() -> Self {
        Self {
            preference: default_preference(),
        }
    }
}

/// Retry settings for transient Gemini failures.
///
/// `None` fields fall back to the client's built-in defaults.
///
/// # Example
///
/// ```toml
/// [retry]
/// no_retry = false
/// max_retries = 5
/// backoff_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct RetrySection {
    /// Disable automatic retry entirely
    #[serde(default)]
    pub no_retry: bool,

    /// Maximum retry attempts per request
    #[serde(default)]
    pub max_retries: Option<usize>,

    /// Initial backoff delay in milliseconds
    #[serde(default)]
    pub backoff_ms: Option<u64>,
}

/// Ad-library scraper settings.
///
/// The token itself comes from the `APIFY_API_TOKEN` environment variable;
/// this section only overrides which actor runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ScrapeSection {
    /// Apify actor to run, in `owner~name` form
    #[serde(default)]
    pub actor: Option<String>,
}

/// Top-level Spyglass configuration.
///
/// Loads settings from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from spyglass.toml)
/// 2. User override (./spyglass.toml or ~/.config/spyglass/spyglass.toml)
///
/// # Example
///
/// ```no_run
/// use spyglass::config::SpyglassConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SpyglassConfig::load()?;
/// println!("Serving on {}:{}", config.server.host, config.server.port);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SpyglassConfig {
    /// HTTP server bind settings
    #[serde(default)]
    pub server: ServerSection,

    /// Model selection settings
    #[serde(default)]
    pub models: ModelsSection,

    /// Request pacing for the Gemini client
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Retry settings for transient failures
    #[serde(default)]
    pub retry: RetrySection,

    /// Ad-library scraper settings
    #[serde(default)]
    pub scrape: ScrapeSection,
}

impl SpyglassConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SpyglassResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                SpyglassError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SpyglassError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (spyglass.toml shipped with the binary)
    /// 2. User config in home directory (~/.config/spyglass/spyglass.toml)
    /// 3. User config in current directory (./spyglass.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> SpyglassResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../spyglass.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/spyglass/spyglass.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("spyglass").required(false));

        // Build and deserialize
        builder
            .build()
            .map_err(|e| {
                SpyglassError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SpyglassError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bundled_values() {
        let config = SpyglassConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.models.preference, default_preference());
        assert_eq!(config.pacing.rpm, Some(10));
        assert!(!config.retry.no_retry);
        assert!(config.scrape.actor.is_none());
    }

    #[test]
    fn partial_toml_fills_missing_sections_with_defaults() {
        let raw = r#"
            [server]
            port = 3000
        "#;

        let config: SpyglassConfig = toml::from_str(raw).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.models.preference, default_preference());
    }
}
