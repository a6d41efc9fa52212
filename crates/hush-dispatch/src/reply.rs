// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing reply texts.

use hush_context::ContextEntry;
use hush_vault::CredentialRecord;

pub const WELCOME: &str = "👋 Welcome! I can help you store encrypted credentials and manage context.\n\nUse /help to see available commands.";

pub const HELP: &str = "Available commands:\n\n\
🔐 Credentials Management:\n\
/creds <title> <username> <password> - Store new credentials\n\
/show <number> - Show decrypted credentials\n\
/listcreds - List all stored credentials\n\n\
📝 Context Management:\n\
/context <title> <content> - Store new context\n\
/getcontext <prompt> - Get AI insights based on stored context\n\
/listcontext [search] - List all stored context entries (optionally filter by title)\n\n\
ℹ️ Other Commands:\n\
/start - Start the bot\n\
/help - Show this help message";

pub const PROMPT_ENCRYPTION_KEY: &str =
    "🔑 Please provide the encryption key (send as a separate message):";
pub const PROMPT_DECRYPTION_KEY: &str = "🔑 Please provide the decryption key:";

pub const CREDENTIALS_STORED: &str = "✅ Credentials stored successfully!";
pub const CREDENTIALS_STORE_FAILED: &str = "❌ Failed to store credentials.";
pub const CREDENTIALS_FETCH_FAILED: &str = "❌ Failed to fetch credentials.";
pub const CREDENTIAL_NOT_FOUND: &str = "❌ Credential not found.";
pub const NO_CREDENTIALS: &str = "📭 No credentials stored yet.";
pub const DECRYPTION_FAILED: &str = "❌ Decryption failed. Wrong key?";

pub const CONTEXT_STORED: &str = "✅ Context stored successfully!";
pub const CONTEXT_STORE_FAILED: &str = "❌ Failed to store context.";
pub const CONTEXT_FETCH_FAILED: &str = "❌ Failed to fetch context.";
pub const CONTEXT_QUERY_FAILED: &str = "❌ Failed to process context with AI.";
pub const NO_RELEVANT_CONTEXT: &str =
    "❌ No relevant context found. Please add some context first using /context command.";
pub const NO_CONTEXTS: &str = "📭 No contexts stored yet.";

/// The decrypted credential, shown with a bounded display lifetime.
pub fn credential_reveal(title: &str, username: &str, password: &str) -> String {
    format!("🔐 Credential Details:\nTitle: {title}\nUsername: {username}\nPassword: {password}")
}

/// Numbered credential list: `id. title (username)` per line.
pub fn credential_list(records: &[CredentialRecord]) -> String {
    let lines = records
        .iter()
        .map(|r| format!("{}. {} ({})", r.id, r.title, r.username))
        .collect::<Vec<_>>()
        .join("\n");
    format!("🔐 Your stored credentials:\n{lines}\n\nUse /show <number> to view details.")
}

/// Context listing. Content is included only when the user filtered by
/// title, mirroring the titles-only overview of the unfiltered list.
pub fn context_list(entries: &[ContextEntry], filter: Option<&str>) -> String {
    let body = entries
        .iter()
        .map(|entry| {
            let title = entry.title.as_deref().unwrap_or("(untitled)");
            if filter.is_some() {
                format!("📌 {title}\n{}", entry.content)
            } else {
                format!("📌 {title}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    match filter {
        Some(f) => format!("📝 Contexts matching \"{f}\":\n{body}"),
        None => format!(
            "📝 Your stored contexts:\n{body}\n\n\
             Use /listcontext <title_keyword> to see content of specific contexts \
             or /getcontext <query> to use them with AI."
        ),
    }
}

pub fn no_contexts_matching(filter: &str) -> String {
    format!("📭 No contexts found matching \"{filter}\".")
}

/// The grounding prompt sent to the text-generation provider.
pub fn grounding_prompt(context: &str, prompt: &str) -> String {
    format!(
        "Context:\n{context}\n\nPrompt: {prompt}\n\n\
         Please provide insights based on the given context."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hush_core::types::{ChatId, Scope, UserId};

    fn record(id: i64, title: &str, username: &str) -> CredentialRecord {
        CredentialRecord {
            id,
            scope: Scope::new(ChatId(1), UserId(2)),
            title: title.to_string(),
            username: username.to_string(),
            encrypted_password: "blob".to_string(),
            created_at: String::new(),
        }
    }

    fn entry(title: Option<&str>, content: &str) -> ContextEntry {
        ContextEntry {
            id: 1,
            scope: Scope::new(ChatId(1), UserId(2)),
            title: title.map(str::to_string),
            content: content.to_string(),
            embedding: vec![],
            created_at: String::new(),
        }
    }

    #[test]
    fn credential_list_is_numbered() {
        let text = credential_list(&[record(1, "bank", "alice"), record(3, "email", "bob")]);
        assert!(text.contains("1. bank (alice)"));
        assert!(text.contains("3. email (bob)"));
        assert!(text.contains("/show <number>"));
    }

    #[test]
    fn unfiltered_context_list_shows_titles_only() {
        let text = context_list(&[entry(Some("recipe"), "bake at 350")], None);
        assert!(text.contains("📌 recipe"));
        assert!(!text.contains("bake at 350"));
    }

    #[test]
    fn filtered_context_list_includes_content() {
        let text = context_list(&[entry(Some("recipe"), "bake at 350")], Some("recipe"));
        assert!(text.contains("📌 recipe"));
        assert!(text.contains("bake at 350"));
        assert!(text.contains("Contexts matching \"recipe\""));
    }

    #[test]
    fn grounding_prompt_embeds_context_and_question() {
        let text = grounding_prompt("bake at 350", "what temperature?");
        assert!(text.starts_with("Context:\nbake at 350"));
        assert!(text.contains("Prompt: what temperature?"));
    }
}
