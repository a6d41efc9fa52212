// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the core flows.
//!
//! Each trait is the narrowest contract the dispatcher needs: a messaging
//! transport, an embedding provider, and a text-generation provider.
//! Production implementations live in `hush-telegram`, `hush-voyage`, and
//! `hush-gemini`; deterministic mocks live in `hush-test-utils`.

pub mod embedding;
pub mod generation;
pub mod messenger;

pub use embedding::Embedder;
pub use generation::Generator;
pub use messenger::Messenger;
