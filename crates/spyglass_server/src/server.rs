//! HTTP server startup.

use std::sync::Arc;

use axum::Router;
use spyglass_error::{ServerError, ServerErrorKind, SpyglassResult};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::create_routes;
use crate::state::AppState;

/// Listen address configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Configure an explicit listen address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Combined `host:port` listen address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The studio web server.
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// Pair wired state with a listen address.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Serve on the default local address.
    pub fn with_default_config(state: AppState) -> Self {
        Self::new(ServerConfig::default(), state)
    }

    fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_routes()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> SpyglassResult<()> {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                address: addr.clone(),
                message: e.to_string(),
            })
        })?;
        info!(%addr, "studio listening");

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

        Ok(())
    }

    /// Bind and serve until the shutdown future resolves.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> SpyglassResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                address: addr.clone(),
                message: e.to_string(),
            })
        })?;
        info!(%addr, "studio listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_address_is_local() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn custom_address_round_trips() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.addr(), "0.0.0.0:9000");
    }
}
