//! # HTTP Server
//!
//! Combines the health and diff routers behind CORS and request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use apidrift_core::AlertSink;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpServerConfig;
use crate::diff_routes::{diff_routes, DriftState};
use crate::health_routes::health_routes;

/// HTTP server for the diff API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server that delivers alerts to the log
    pub fn with_config(config: HttpServerConfig) -> Self {
        let state = Arc::new(DriftState::new(config.drift.clone()));
        Self::with_state(config, state)
    }

    /// Create a server with a specific alert transport
    pub fn with_sink(config: HttpServerConfig, sink: Arc<dyn AlertSink>) -> Self {
        let state = Arc::new(DriftState::with_sink(config.drift.clone(), sink));
        Self::with_state(config, state)
    }

    fn with_state(config: HttpServerConfig, state: Arc<DriftState>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when `host` is not an IP literal
    /// (hostnames such as `localhost` are not resolved). Otherwise fails when
    /// the address cannot be bound or the server stops with an error.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, environment = %self.config.drift.environment, "apidrift server listening");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins(&config.cors_origins)))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Parse the configured origins; entries that are not valid header values are
/// skipped with a warning.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin.escape_debug(), error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: Arc<DriftState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(diff_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}
