// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sensei serve` command implementation.
//!
//! Opens the SQLite store, builds the DeepSeek client when an API key is
//! configured, and runs the gateway until a shutdown signal arrives.

use std::sync::Arc;

use sensei_config::SenseiConfig;
use sensei_core::SenseiError;
use sensei_deepseek::DeepSeekClient;
use sensei_gateway::GatewayState;
use sensei_storage::Database;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `sensei serve` command.
pub async fn run_serve(config: SenseiConfig) -> Result<(), SenseiError> {
    init_tracing(&config.server.log_level);

    info!("starting sensei serve");

    let db = Database::open(&config.storage.database_path).await?;

    // A missing API key keeps the preset-code API available; only /ai
    // requests are rejected until a key is configured.
    let chat = match DeepSeekClient::new(&config.deepseek) {
        Ok(client) => {
            info!(model = %config.deepseek.model, "DeepSeek client ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "DeepSeek client unavailable, /ai requests will be rejected");
            None
        }
    };

    let cancel = shutdown::install_signal_handler();
    let state = GatewayState {
        chat,
        db: db.clone(),
        shutdown: cancel.clone(),
    };

    let result = sensei_gateway::serve(state, &config.server).await;

    if let Err(e) = db.close().await {
        warn!(error = %e, "database close failed");
    }
    result?;

    info!("sensei serve shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sensei={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
