// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for DeepSeek streaming chat-completion responses.
//!
//! Converts a reqwest response byte stream into typed [`ChatChunk`] items
//! using the `eventsource-stream` crate for SSE protocol compliance.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use sensei_core::SenseiError;

use crate::types::ChatChunk;

/// Parses a reqwest streaming response into a stream of [`ChatChunk`]s.
///
/// DeepSeek streams unnamed SSE events whose `data` field holds one JSON
/// chunk each, terminated by a literal `[DONE]` marker. The stream ends at
/// the marker; chunks after it are never surfaced.
pub fn parse_chunk_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<ChatChunk, SenseiError>> + Send>> {
    let byte_stream = response.bytes_stream();
    let event_stream = byte_stream.eventsource();

    let mapped = event_stream
        .take_while(|result| {
            let done = matches!(result, Ok(event) if event.data.trim() == "[DONE]");
            futures::future::ready(!done)
        })
        .filter_map(|result| async move {
            match result {
                Ok(event) => {
                    if event.data.trim().is_empty() {
                        return None;
                    }
                    Some(
                        serde_json::from_str::<ChatChunk>(&event.data).map_err(|e| {
                            SenseiError::Upstream {
                                message: format!("failed to parse stream chunk: {e}"),
                                source: Some(Box::new(e)),
                            }
                        }),
                    )
                }
                Err(e) => Some(Err(SenseiError::Upstream {
                    message: format!("SSE stream error: {e}"),
                    source: None,
                })),
            }
        });

    Box::pin(mapped)
}
