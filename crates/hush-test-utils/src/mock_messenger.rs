// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging transport for deterministic testing.
//!
//! `MockMessenger` implements `Messenger` with captured sends and deletes for
//! assertion in tests. Message ids are assigned sequentially starting at 1000
//! so they never collide with the inbound ids tests pick for user messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use hush_core::HushError;
use hush_core::traits::Messenger;
use hush_core::types::{ChatId, MessageId};

/// A message captured by [`MockMessenger::send_text`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat: ChatId,
    pub text: String,
    pub message_id: MessageId,
}

/// A mock transport capturing all sends and deletes.
pub struct MockMessenger {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    deleted: Arc<Mutex<Vec<(ChatId, MessageId)>>>,
    next_id: AtomicI64,
    fail_sends: std::sync::atomic::AtomicBool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicI64::new(1000),
            fail_sends: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Make every subsequent `send_text` fail with a channel error.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// All messages sent so far, in order.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Concatenated text of every sent message, for substring assertions.
    pub async fn sent_text(&self) -> String {
        self.sent
            .lock()
            .await
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The last message sent, if any.
    pub async fn last_message(&self) -> Option<SentMessage> {
        self.sent.lock().await.last().cloned()
    }

    /// All (chat, message) pairs deleted so far.
    pub async fn deleted_messages(&self) -> Vec<(ChatId, MessageId)> {
        self.deleted.lock().await.clone()
    }

    /// Whether a specific message id was deleted.
    pub async fn was_deleted(&self, message: MessageId) -> bool {
        self.deleted.lock().await.iter().any(|(_, m)| *m == message)
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
        self.deleted.lock().await.clear();
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<MessageId, HushError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(HushError::Channel {
                message: "mock send failure".to_string(),
                source: None,
            });
        }
        let message_id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.sent.lock().await.push(SentMessage {
            chat,
            text: text.to_string(),
            message_id,
        });
        Ok(message_id)
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), HushError> {
        self.deleted.lock().await.push((chat, message));
        Ok(())
    }
}
