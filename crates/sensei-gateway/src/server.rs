// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway router, shared state, and server lifecycle.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{delete, get, post};
use sensei_config::ServerConfig;
use sensei_core::SenseiError;
use sensei_deepseek::DeepSeekClient;
use sensei_storage::Database;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::handlers;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// DeepSeek client, `None` when no API key is configured. Requests to
    /// `/ai` are rejected until a key is set; the preset-code API keeps
    /// working without one.
    pub chat: Option<Arc<DeepSeekClient>>,
    /// Preset-code store.
    pub db: Database,
    /// Fires on shutdown; every in-flight diagnosis bridge observes it.
    pub shutdown: CancellationToken,
}

/// Build the gateway router.
///
/// `/ai` is registered as a static route, so it takes priority over the
/// `/{id}` capture at the same depth.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_presets).post(handlers::create_preset),
        )
        .route("/query/{query}", get(handlers::get_preset_by_query))
        .route("/{id}", delete(handlers::delete_preset))
        .route("/ai", post(handlers::diagnose))
        .with_state(state)
}

/// Bind and serve the gateway until the shutdown token fires.
pub async fn serve(state: GatewayState, config: &ServerConfig) -> Result<(), SenseiError> {
    let shutdown = state.shutdown.clone();
    let app = router(state).layer(cors_layer(&config.allowed_origins));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SenseiError::Gateway {
            message: format!("failed to bind gateway to {addr}"),
            source: Some(Box::new(e)),
        })?;

    info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| SenseiError::Gateway {
            message: "gateway server error".to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

/// Build the CORS layer from the configured origins.
///
/// An empty list falls back to a permissive layer so local tools can reach
/// the API without configuration.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn gateway_state_is_cheap_to_clone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let state = GatewayState {
            chat: None,
            db,
            shutdown: CancellationToken::new(),
        };
        let cloned = state.clone();
        assert!(cloned.chat.is_none());
    }

    #[test]
    fn cors_layer_skips_unparseable_origins() {
        let origins = vec!["http://localhost:5173".to_string(), "bad\u{0}origin".to_string()];
        // Must not panic on the invalid entry.
        let _layer = cors_layer(&origins);
    }
}
