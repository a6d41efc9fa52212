// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hush bot.
//!
//! Provides the error taxonomy, the scope/identifier types, and the
//! collaborator traits (`Messenger`, `Embedder`, `Generator`) implemented by
//! the transport and provider crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::HushError;
pub use traits::{Embedder, Generator, Messenger};
pub use types::{ChatId, MessageId, Scope, UserId};
