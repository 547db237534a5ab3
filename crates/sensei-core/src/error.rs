// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sensei service.

use thiserror::Error;

/// The primary error type used across all Sensei crates.
#[derive(Debug, Error)]
pub enum SenseiError {
    /// Configuration errors (invalid TOML, missing required fields, missing API key).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A write collided with an existing row (unique constraint).
    #[error("{0}")]
    Conflict(String),

    /// Upstream chat-completion API errors (request failure, bad status, broken stream).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP server errors (bind failure, accept loop failure).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
