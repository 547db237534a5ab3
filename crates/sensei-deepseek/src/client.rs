// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the DeepSeek chat-completion API.
//!
//! Provides [`DeepSeekClient`] which handles request construction,
//! bearer authentication, and streaming SSE responses.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue};
use sensei_config::DeepSeekConfig;
use sensei_core::SenseiError;
use tracing::debug;

use crate::sse;
use crate::types::{ApiErrorResponse, ChatChunk, ChatMessage, ChatRequest};
use crate::{SYSTEM_PROMPT, user_prompt};

/// HTTP client for DeepSeek API communication.
///
/// Construction fails before any network activity when no API key is
/// configured, so callers can reject requests up front.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    seed: i64,
}

impl DeepSeekClient {
    /// Creates a new DeepSeek API client from configuration.
    ///
    /// Returns `SenseiError::Config` if `deepseek.api_key` is unset or empty.
    pub fn new(config: &DeepSeekConfig) -> Result<Self, SenseiError> {
        let api_key = config.api_key.as_deref().unwrap_or_default();
        if api_key.is_empty() {
            return Err(SenseiError::Config("deepseek.api_key is not set".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                SenseiError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| SenseiError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            seed: config.seed,
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds a streaming diagnosis request for the given code and error text.
    pub fn diagnosis_request(&self, language: &str, code: &str, error_info: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(&user_prompt(language, code, error_info)),
            ],
            stream: true,
            seed: self.seed,
        }
    }

    /// Sends a streaming request and returns a stream of chat chunks.
    ///
    /// The stream is lazy: no chunk is read from the network until the
    /// caller polls it. Dropping the stream aborts the upstream request.
    pub async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatChunk, SenseiError>> + Send>>, SenseiError>
    {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SenseiError::Upstream {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "streaming response received");

        if status.is_success() {
            return Ok(sse::parse_chunk_stream(response));
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!("DeepSeek API error: {}", api_err.error.message)
        } else {
            format!("API returned {status}: {body}")
        };
        Err(SenseiError::Upstream {
            message,
            source: None,
        })
    }
}
