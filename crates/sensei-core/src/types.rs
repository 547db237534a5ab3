// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared domain types for the Sensei service.

use serde::{Deserialize, Serialize};

/// A stored code snippet keyed by a unique query string.
///
/// Preset codes let the frontend prefill the editor for well-known
/// exercises. The `query` key is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetCode {
    /// Row id (SQLite autoincrement primary key).
    pub id: i64,
    /// Unique lookup key.
    pub query: String,
    /// The stored snippet.
    pub code: String,
}
