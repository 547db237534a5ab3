// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek chat-completion provider adapter for the Sensei diagnosis service.
//!
//! This crate wraps the DeepSeek streaming API: it builds diagnosis prompts,
//! sends chat-completion requests, and parses the SSE response into typed
//! [`types::ChatChunk`] items.

pub mod client;
pub mod prompt;
pub mod sse;
pub mod types;

pub use client::DeepSeekClient;
pub use prompt::{SYSTEM_PROMPT, user_prompt};
pub use types::{ChatChunk, ChatMessage, ChatRequest};
