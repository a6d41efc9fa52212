// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hush integration tests.
//!
//! Deterministic mock implementations of the collaborator traits: a capturing
//! messenger, a programmable embedder, and a canned-response generator.

pub mod mock_embedder;
pub mod mock_generator;
pub mod mock_messenger;

pub use mock_embedder::MockEmbedder;
pub use mock_generator::MockGenerator;
pub use mock_messenger::{MockMessenger, SentMessage};
