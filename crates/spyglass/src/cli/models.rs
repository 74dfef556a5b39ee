//! Model listing command handler.

use spyglass::config::SpyglassConfig;
use spyglass::{ModelCatalog, ModelDiscovery, SpyglassResult, detect_model};

/// Handle the `models` command.
pub async fn list_models() -> SpyglassResult<()> {
    let config = SpyglassConfig::load()?;
    let catalog = ModelCatalog::new()?;
    let available = catalog.list_generation_models().await?;

    let active = detect_model(&available, &config.models.preference);

    println!("Generation models ({}):", available.len());
    for model in &available {
        match &active {
            Some(active) if active == model => println!("  {model} (active)"),
            _ => println!("  {model}"),
        }
    }

    Ok(())
}
