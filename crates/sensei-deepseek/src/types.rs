// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the DeepSeek chat-completion API.
//!
//! Request types serialize to the OpenAI-compatible JSON shape DeepSeek
//! accepts; chunk types deserialize the streaming response deltas.

use serde::{Deserialize, Serialize};

/// A chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "deepseek-chat").
    pub model: String,
    /// Conversation messages, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Whether to stream the response as SSE chunks.
    pub stream: bool,
    /// Sampling seed for reproducible output.
    pub seed: i64,
}

/// A single message in a chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role: "system", "user", or "assistant".
    pub role: String,
    /// Message text content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system-role message.
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    /// Creates a user-role message.
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// One streamed chunk of a chat-completion response.
///
/// Fields other than `choices` (id, object, usage) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    /// Per-choice deltas carried by this chunk.
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

impl ChatChunk {
    /// Concatenated delta text across all choices in this chunk.
    ///
    /// Chunks carrying only metadata (role markers, finish reasons) yield
    /// an empty string.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for choice in &self.choices {
            if let Some(content) = &choice.delta.content {
                out.push_str(content);
            }
        }
        out
    }
}

/// A single choice within a streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    /// Incremental content update for this choice.
    #[serde(default)]
    pub delta: ChunkDelta,
}

/// The delta payload of a streamed choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    /// New text content, absent on role-only and finish chunks.
    #[serde(default)]
    pub content: Option<String>,
}

/// Error response body returned by the DeepSeek API on non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error detail object.
    pub error: ApiErrorDetail,
}

/// Detail payload of an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable error description.
    pub message: String,
}
