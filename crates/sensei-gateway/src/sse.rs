// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events frame encoding for the diagnosis stream.
//!
//! Every frame the gateway writes is built here: an optional `event:` line
//! naming the event, then a single `data:` line carrying a JSON payload,
//! then the blank line that terminates the frame. Payloads are serialized
//! with sorted keys, so a given event always encodes to the same bytes.

use serde_json::Value;
use tracing::warn;

/// Encode one SSE frame carrying `payload` as its `data:` line.
///
/// When the payload has a string under the `"data"` key, carriage returns in
/// it are normalized to plain newlines first; a raw CR would otherwise split
/// the `data:` line mid-frame once the JSON escape is undone client-side by
/// consumers that treat the payload as text. Returns `None` when the payload
/// cannot be serialized, in which case the frame is dropped and the stream
/// continues without it.
pub fn encode_event(name: &str, mut payload: Value) -> Option<Vec<u8>> {
    if let Some(Value::String(data)) = payload.get_mut("data") {
        if data.contains('\r') {
            *data = data.replace("\r\n", "\n").replace('\r', "\n");
        }
    }

    let json = match serde_json::to_vec(&payload) {
        Ok(json) => json,
        Err(e) => {
            warn!(event = name, error = %e, "failed to encode SSE payload, dropping frame");
            return None;
        }
    };

    let mut frame = Vec::with_capacity(name.len() + json.len() + 16);
    if !name.is_empty() {
        frame.extend_from_slice(b"event: ");
        frame.extend_from_slice(name.as_bytes());
        frame.push(b'\n');
    }
    frame.extend_from_slice(b"data: ");
    frame.extend_from_slice(&json);
    frame.extend_from_slice(b"\n\n");
    Some(frame)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encodes_named_event_with_json_data_line() {
        let frame = encode_event("chunk", json!({"data": "Line 3"})).unwrap();
        assert_eq!(frame, b"event: chunk\ndata: {\"data\":\"Line 3\"}\n\n");
    }

    #[test]
    fn encodes_done_event_with_empty_data() {
        let frame = encode_event("done", json!({"data": ""})).unwrap();
        assert_eq!(frame, b"event: done\ndata: {\"data\":\"\"}\n\n");
    }

    #[test]
    fn empty_name_omits_event_line() {
        let frame = encode_event("", json!({"data": "x"})).unwrap();
        assert_eq!(frame, b"data: {\"data\":\"x\"}\n\n");
    }

    #[test]
    fn crlf_in_data_becomes_lf() {
        let frame = encode_event("chunk", json!({"data": "a\r\nb"})).unwrap();
        assert_eq!(frame, b"event: chunk\ndata: {\"data\":\"a\\nb\"}\n\n");
    }

    #[test]
    fn lone_cr_in_data_becomes_lf() {
        let frame = encode_event("chunk", json!({"data": "a\rb"})).unwrap();
        assert_eq!(frame, b"event: chunk\ndata: {\"data\":\"a\\nb\"}\n\n");
    }

    #[test]
    fn bare_crlf_chunk_becomes_single_newline() {
        let frame = encode_event("chunk", json!({"data": "\r\n"})).unwrap();
        assert_eq!(frame, b"event: chunk\ndata: {\"data\":\"\\n\"}\n\n");
    }

    #[test]
    fn non_data_keys_are_not_normalized() {
        let frame = encode_event("error", json!({"message": "a\r\nb"})).unwrap();
        assert_eq!(frame, b"event: error\ndata: {\"message\":\"a\\r\\nb\"}\n\n");
    }

    #[test]
    fn encoding_is_deterministic_across_calls() {
        let payload = json!({"data": "same", "extra": 1});
        let first = encode_event("chunk", payload.clone()).unwrap();
        let second = encode_event("chunk", payload).unwrap();
        assert_eq!(first, second);
    }
}
