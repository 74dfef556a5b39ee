//! Spyglass CLI binary.
//!
//! This binary provides command-line access to Spyglass functionality:
//! - Serve the web studio
//! - Generate marketing assets from the terminal
//! - List reachable generation models

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_models, run_generate, run_server};

    // Load .env credentials before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Serve { addr } => {
            run_server(addr).await?;
        }

        Commands::Generate {
            kind,
            topic,
            audience,
            title,
            seed_keyword,
            country,
            stream,
        } => {
            run_generate(
                kind,
                &topic,
                audience.as_deref(),
                title.as_deref(),
                seed_keyword.as_deref(),
                &country,
                stream,
            )
            .await?;
        }

        Commands::Models => {
            list_models().await?;
        }
    }

    Ok(())
}
