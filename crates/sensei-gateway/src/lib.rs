// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Sensei diagnosis service.
//!
//! The gateway serves two surfaces from one router: a small JSON API for
//! managing preset codes, and `POST /ai`, which bridges a streaming DeepSeek
//! chat completion into a Server-Sent Events response.

pub mod bridge;
pub mod handlers;
pub mod server;
pub mod sse;

pub use server::{GatewayState, router, serve};
