// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport for the Hush bot.
//!
//! Implements [`Messenger`] over the Telegram Bot API via teloxide. The bot
//! receives updates through the webhook server in the `hush` binary; this
//! crate only covers the outbound side (send and delete).

use async_trait::async_trait;
use hush_core::HushError;
use hush_core::traits::Messenger;
use hush_core::types::{ChatId, MessageId};
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, MessageId as TgMessageId, Recipient};
use tracing::debug;

/// Telegram implementation of [`Messenger`].
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Creates a messenger from a bot token.
    pub fn new(token: &str) -> Result<Self, HushError> {
        if token.is_empty() {
            return Err(HushError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }
        Ok(Self {
            bot: Bot::new(token),
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<MessageId, HushError> {
        let sent = self
            .bot
            .send_message(Recipient::Id(TgChatId(chat.0)), text)
            .await
            .map_err(|e| HushError::Channel {
                message: format!("failed to send message: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(chat = chat.0, message = sent.id.0, "message sent");
        Ok(MessageId(i64::from(sent.id.0)))
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), HushError> {
        let message_id = i32::try_from(message.0).map_err(|_| HushError::Channel {
            message: format!("message id {} out of range for Telegram", message.0),
            source: None,
        })?;
        self.bot
            .delete_message(TgChatId(chat.0), TgMessageId(message_id))
            .await
            .map_err(|e| HushError::Channel {
                message: format!("failed to delete message: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(chat = chat.0, message = message_id, "message deleted");
        Ok(())
    }
}
