// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging transport trait.

use async_trait::async_trait;

use crate::error::HushError;
use crate::types::{ChatId, MessageId};

/// Outbound side of the chat transport.
///
/// Deletes are best-effort: the transport is not a secure channel, and
/// removing secret-bearing messages only shrinks the exposure window. Callers
/// must never treat a successful delete as a security guarantee.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a text message and returns the transport-assigned message id.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<MessageId, HushError>;

    /// Deletes a previously sent or received message.
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), HushError>;
}
