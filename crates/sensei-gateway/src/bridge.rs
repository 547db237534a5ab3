// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridge between an upstream chat-completion stream and the SSE sink.
//!
//! The bridge pulls parsed chunks from the upstream one at a time, encodes
//! each non-empty delta as a `chunk` frame, and hands frames to a bounded
//! channel whose receiver feeds the HTTP response body. The channel holds a
//! single frame, so the bridge never runs more than one frame ahead of the
//! client. Exhaustion and upstream failure both end the stream with a
//! terminal `done` frame; cancellation ends it with nothing further.

use futures::{Stream, StreamExt};
use sensei_core::SenseiError;
use sensei_deepseek::ChatChunk;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::sse::encode_event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeState {
    Streaming,
    Done,
}

/// Drives one diagnosis stream from upstream chunks to encoded SSE frames.
pub struct SseBridge<S> {
    source: S,
    state: BridgeState,
}

impl<S> SseBridge<S>
where
    S: Stream<Item = Result<ChatChunk, SenseiError>> + Unpin,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: BridgeState::Streaming,
        }
    }

    /// Run the bridge until the upstream ends, the sink closes, or `cancel`
    /// fires.
    ///
    /// A fired token wins every race: once it is observed no further frame
    /// is sent, terminal frames included, so the number of frames the client
    /// saw is final at the moment of cancellation. Dropping the bridge drops
    /// the upstream stream with it, which aborts the underlying HTTP
    /// response.
    pub async fn run(mut self, frames: mpsc::Sender<Vec<u8>>, cancel: CancellationToken) {
        while self.state == BridgeState::Streaming {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("diagnosis stream cancelled");
                    return;
                }
                _ = frames.closed() => {
                    debug!("client disconnected, closing diagnosis stream");
                    return;
                }
                item = self.source.next() => match item {
                    Some(Ok(chunk)) => {
                        let text = chunk.text();
                        if text.is_empty() {
                            continue;
                        }
                        let Some(frame) = encode_event("chunk", json!({ "data": text })) else {
                            continue;
                        };
                        if !send_frame(&frames, &cancel, frame).await {
                            return;
                        }
                    }
                    Some(Err(e)) => self.finish(&frames, &cancel, Some(e)).await,
                    None => self.finish(&frames, &cancel, None).await,
                },
            }
        }
    }

    /// Emit the terminal frames: an `error` frame when the upstream failed,
    /// then exactly one `done` frame.
    async fn finish(
        &mut self,
        frames: &mpsc::Sender<Vec<u8>>,
        cancel: &CancellationToken,
        error: Option<SenseiError>,
    ) {
        self.state = BridgeState::Done;

        if let Some(e) = error {
            debug!(error = %e, "upstream stream failed, ending diagnosis stream");
            if let Some(frame) = encode_event("error", json!({ "message": e.to_string() })) {
                if !send_frame(frames, cancel, frame).await {
                    return;
                }
            }
        }

        if let Some(frame) = encode_event("done", json!({ "data": "" })) {
            send_frame(frames, cancel, frame).await;
        }
    }
}

/// Send one frame unless cancellation or a closed sink preempts it.
///
/// The send future is dropped when the token fires first, and a dropped
/// `send` leaves the channel untouched, so a cancelled bridge never delivers
/// a frame it raced against.
async fn send_frame(
    frames: &mpsc::Sender<Vec<u8>>,
    cancel: &CancellationToken,
    frame: Vec<u8>,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        res = frames.send(frame) => res.is_ok(),
    }
}
