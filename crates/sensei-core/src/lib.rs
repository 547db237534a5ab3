// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sensei service.
//!
//! Provides the shared error type and the domain types used across the
//! Sensei workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SenseiError;
pub use types::PresetCode;
