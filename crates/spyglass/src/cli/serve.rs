//! Web studio command handler.

use spyglass::config::SpyglassConfig;
use spyglass::runtime::build_state;
use spyglass::{ConfigError, HttpServer, ServerConfig, SpyglassResult};

/// Handle the `serve` command.
pub async fn run_server(addr: Option<String>) -> SpyglassResult<()> {
    let config = SpyglassConfig::load()?;

    let server_config = match addr {
        Some(addr) => parse_addr(&addr)?,
        None => ServerConfig::new(config.server.host.clone(), config.server.port),
    };

    let state = build_state(&config).await?;
    let server = HttpServer::new(server_config, state);

    tracing::info!("Studio starting. Press Ctrl+C to stop.");

    server
        .run_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

/// Split a `host:port` string into a listen configuration.
fn parse_addr(addr: &str) -> SpyglassResult<ServerConfig> {
    let (host, port) = addr.rsplit_once(':').ok_or_else(|| {
        ConfigError::new(format!(
            "Invalid bind address '{addr}': expected host:port"
        ))
    })?;

    let port: u16 = port
        .parse()
        .map_err(|_| ConfigError::new(format!("Invalid port in bind address '{addr}'")))?;

    Ok(ServerConfig::new(host, port))
}
