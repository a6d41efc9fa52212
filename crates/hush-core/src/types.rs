// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common identifier types used across the Hush workspace.

use serde::{Deserialize, Serialize};

/// Unique identifier for a conversation (Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Unique identifier for a user within the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Unique identifier for a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

/// The (conversation, user) pair every credential, context entry, and pending
/// challenge is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl Scope {
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self { chat_id, user_id }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chat_id.0, self.user_id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn scope_is_a_usable_map_key() {
        let mut map = HashMap::new();
        let scope = Scope::new(ChatId(7), UserId(42));
        map.insert(scope, "entry");
        assert_eq!(map.get(&Scope::new(ChatId(7), UserId(42))), Some(&"entry"));
        assert_eq!(map.get(&Scope::new(ChatId(7), UserId(43))), None);
    }

    #[test]
    fn scope_display() {
        let scope = Scope::new(ChatId(-100123), UserId(42));
        assert_eq!(scope.to_string(), "-100123:42");
    }

    #[test]
    fn ids_serialize_transparently_enough() {
        let chat = ChatId(12345);
        let json = serde_json::to_string(&chat).unwrap();
        let back: ChatId = serde_json::from_str(&json).unwrap();
        assert_eq!(chat, back);
    }
}
