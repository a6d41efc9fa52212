// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hush - a Telegram bot that keeps encrypted credentials and semantic
//! context.
//!
//! The binary wires the dispatcher to the Telegram, Voyage, and Gemini
//! collaborators and serves the webhook; this library exposes the server
//! wiring for integration tests.

pub mod serve;
