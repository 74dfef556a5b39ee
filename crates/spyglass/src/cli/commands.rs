//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Spyglass - Marketing content studio over the Gemini API
#[derive(Parser, Debug)]
#[command(name = "spyglass")]
#[command(about = "Marketing content studio: e-book drafts, funnel copy, and competitor ad research", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web studio
    Serve {
        /// Bind address as host:port, overriding the configured values
        #[arg(long)]
        addr: Option<String>,
    },

    /// Generate one asset and print it to stdout
    Generate {
        /// Asset to generate
        kind: GenerateKind,

        /// Product topic the asset is about
        #[arg(long)]
        topic: String,

        /// Audience line steering the copy
        #[arg(long)]
        audience: Option<String>,

        /// Chapter title (chapter kind only)
        #[arg(long)]
        title: Option<String>,

        /// Keyword to scrape competitor ads for before generating
        #[arg(long)]
        seed_keyword: Option<String>,

        /// Two-letter country code for the ad scrape
        #[arg(long, default_value = "US")]
        country: String,

        /// Print the draft as it generates (chapter kind only)
        #[arg(long)]
        stream: bool,
    },

    /// List the generation models the API key can reach
    Models,
}

/// Assets the generate command can produce
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GenerateKind {
    /// E-book chapter
    Chapter,
    /// Cover-art prompt for an image model
    Cover,
    /// Short-form ad copy variants
    Ads,
    /// Landing page HTML
    Landing,
    /// Post-purchase upsell copy
    Upsell,
    /// Checkout order-bump copy
    Bump,
}
