// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the preset-code API and the diagnosis stream.

use std::convert::Infallible;

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, Version, header};
use axum::response::{IntoResponse, Response};
use sensei_core::SenseiError;
use sensei_storage::queries::presets;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::bridge::SseBridge;
use crate::server::GatewayState;

/// Body of `POST /ai`. All fields default to empty, matching clients that
/// send only the code they want looked at.
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub error_info: String,
}

/// Body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct CreatePresetRequest {
    pub query: String,
    pub code: String,
}

/// Success envelope wrapping every non-streaming payload under `data`.
#[derive(Debug, Serialize)]
struct DataResponse<T> {
    data: T,
}

/// Error envelope.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(DataResponse { data })).into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// GET / lists all preset codes, newest first.
pub async fn list_presets(State(state): State<GatewayState>) -> Response {
    match presets::list(&state.db).await {
        Ok(codes) => ok(codes),
        Err(e) => internal_error(e.to_string()),
    }
}

/// GET /query/{query} looks up one preset code by its query string.
pub async fn get_preset_by_query(
    State(state): State<GatewayState>,
    Path(query): Path<String>,
) -> Response {
    match presets::get_by_query(&state.db, &query).await {
        Ok(Some(preset)) => ok(preset),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Record not found!".to_string(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(e.to_string()),
    }
}

/// POST / stores a new preset code. The query must be unique.
pub async fn create_preset(
    State(state): State<GatewayState>,
    payload: Result<Json<CreatePresetRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if request.query.is_empty() || request.code.is_empty() {
        return bad_request("query and code must not be empty");
    }

    match presets::create(&state.db, &request.query, &request.code).await {
        Ok(preset) => ok(preset),
        Err(e @ SenseiError::Conflict(_)) => bad_request(e.to_string()),
        Err(e) => internal_error(e.to_string()),
    }
}

/// DELETE /{id} removes a preset code.
pub async fn delete_preset(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(path) => path,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match presets::delete(&state.db, id).await {
        Ok(true) => ok(true),
        Ok(false) => bad_request("Record not found!"),
        Err(e) => internal_error(e.to_string()),
    }
}

/// POST /ai streams a DeepSeek diagnosis of the submitted code as
/// Server-Sent Events.
///
/// Failures before the upstream stream is open surface as plain JSON error
/// responses; the first SSE frame is only written once the upstream accepted
/// the request and the transport can stream.
pub async fn diagnose(
    State(state): State<GatewayState>,
    version: Version,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let Some(chat) = state.chat.clone() else {
        return bad_request("deepseek.api_key is not set");
    };

    // HTTP/0.9 has no headers and no chunked transfer, so an event stream
    // cannot be written to it. Checked before the upstream session is opened.
    if version == Version::HTTP_09 {
        return internal_error("streaming not supported");
    }

    let chat_request = chat.diagnosis_request(&request.language, &request.code, &request.error_info);
    let source = match chat.stream_chat(&chat_request).await {
        Ok(source) => source,
        Err(e) => return bad_request(e.to_string()),
    };

    debug!(language = %request.language, "diagnosis stream opened");

    // One-slot channel: the bridge stays at most one encoded frame ahead of
    // the client.
    let (tx, rx) = mpsc::channel::<Vec<u8>>(1);
    let cancel = state.shutdown.child_token();
    tokio::spawn(SseBridge::new(source).run(tx, cancel));

    let body = Body::from_stream(futures::stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|frame| (Ok::<_, Infallible>(frame), rx))
    }));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
        .into_response()
}
