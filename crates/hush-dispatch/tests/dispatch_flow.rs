// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end dispatcher tests over mock collaborators and an in-memory
//! database.

use std::sync::Arc;
use std::time::Duration;

use hush_context::{ContextIndex, ContextStore};
use hush_core::types::{ChatId, MessageId, UserId};
use hush_dispatch::{DispatcherConfig, VaultDispatcher};
use hush_pending::PendingRegistry;
use hush_storage::Database;
use hush_test_utils::{MockEmbedder, MockGenerator, MockMessenger};
use hush_vault::{CredentialStore, SecretCipher};

const CHAT: ChatId = ChatId(10);
const USER: UserId = UserId(20);

struct Fixture {
    dispatcher: VaultDispatcher,
    messenger: Arc<MockMessenger>,
    embedder: Arc<MockEmbedder>,
    generator: Arc<MockGenerator>,
    credentials: Arc<CredentialStore>,
}

impl Fixture {
    /// Build a dispatcher with mock collaborators. Display TTLs are zero so
    /// no background deletions interfere with assertions; the one test that
    /// exercises scheduled deletion overrides them.
    async fn new(pending_ttl: Duration, config: DispatcherConfig) -> Self {
        let db = Database::open_in_memory().await.unwrap();
        let conn = db.connection().clone();

        let messenger = Arc::new(MockMessenger::new());
        let embedder = Arc::new(MockEmbedder::new(vec![0.0, 1.0]));
        let generator = Arc::new(MockGenerator::new("grounded answer"));
        let registry = Arc::new(PendingRegistry::new(pending_ttl));
        let credentials = Arc::new(CredentialStore::new(conn.clone()));
        let contexts = Arc::new(ContextIndex::new(Arc::new(ContextStore::new(conn))));

        let dispatcher = VaultDispatcher::new(
            messenger.clone(),
            embedder.clone(),
            generator.clone(),
            registry,
            credentials.clone(),
            contexts,
            SecretCipher::new(1_000),
            config,
        );

        Self {
            dispatcher,
            messenger,
            embedder,
            generator,
            credentials,
        }
    }

    async fn standard() -> Self {
        let config = DispatcherConfig {
            notice_ttl: Duration::ZERO,
            list_ttl: Duration::ZERO,
            reveal_ttl: Duration::ZERO,
            ..DispatcherConfig::default()
        };
        Self::new(Duration::from_secs(60), config).await
    }

    async fn send(&self, message_id: i64, text: &str) {
        self.dispatcher
            .handle_message(CHAT, USER, MessageId(message_id), text)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn store_then_reveal_roundtrip() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice secret1").await;
    let prompt = fx.messenger.last_message().await.unwrap();
    assert!(prompt.text.contains("encryption key"));

    fx.send(2, "k1").await;
    assert!(fx.messenger.sent_text().await.contains("✅ Credentials stored"));

    fx.send(3, "/show 1").await;
    let prompt = fx.messenger.last_message().await.unwrap();
    assert!(prompt.text.contains("decryption key"));

    fx.send(4, "k1").await;
    let reveal = fx.messenger.last_message().await.unwrap();
    assert!(reveal.text.contains("Title: bank"));
    assert!(reveal.text.contains("Username: alice"));
    assert!(reveal.text.contains("Password: secret1"));
}

#[tokio::test]
async fn wrong_passphrase_reveals_nothing() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice secret1").await;
    fx.send(2, "k1").await;
    fx.send(3, "/show 1").await;
    fx.send(4, "wrong").await;

    let last = fx.messenger.last_message().await.unwrap();
    assert!(last.text.contains("Decryption failed"));
    assert!(
        !fx.messenger.sent_text().await.contains("secret1"),
        "the plaintext must never appear in any outbound message"
    );
}

#[tokio::test]
async fn plaintext_is_never_persisted() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice secret1").await;
    fx.send(2, "k1").await;

    let scope = hush_core::types::Scope::new(CHAT, USER);
    let record = fx.credentials.get(scope, 1).await.unwrap().unwrap();
    assert!(!record.encrypted_password.contains("secret1"));
    // Username and title are stored in clear by design.
    assert_eq!(record.username, "alice");
    assert_eq!(record.title, "bank");
}

#[tokio::test]
async fn secret_bearing_messages_are_deleted() {
    let fx = Fixture::standard().await;

    // msg 1 carries the plaintext password; the bot's prompt carries nothing
    // secret but is removed with the reply to leave no trace of the flow.
    fx.send(1, "/creds bank alice secret1").await;
    let prompt_id = fx.messenger.last_message().await.unwrap().message_id;
    fx.send(2, "k1").await;

    assert!(fx.messenger.was_deleted(MessageId(1)).await);
    assert!(fx.messenger.was_deleted(MessageId(2)).await);
    assert!(fx.messenger.was_deleted(prompt_id).await);

    fx.send(3, "/show 1").await;
    let prompt_id = fx.messenger.last_message().await.unwrap().message_id;
    fx.send(4, "k1").await;

    assert!(fx.messenger.was_deleted(MessageId(3)).await);
    assert!(fx.messenger.was_deleted(MessageId(4)).await);
    assert!(fx.messenger.was_deleted(prompt_id).await);
}

#[tokio::test]
async fn live_challenge_captures_even_command_shaped_messages() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice secret1").await;
    // The very next message is the passphrase, even if it looks like a
    // command.
    fx.send(2, "/help").await;

    let sent = fx.messenger.sent_text().await;
    assert!(sent.contains("✅ Credentials stored"));
    assert!(!sent.contains("Available commands"));

    // And the credential decrypts with that passphrase.
    fx.send(3, "/show 1").await;
    fx.send(4, "/help").await;
    let reveal = fx.messenger.last_message().await.unwrap();
    assert!(reveal.text.contains("Password: secret1"));
}

#[tokio::test]
async fn expired_challenge_falls_through_to_dispatch() {
    let config = DispatcherConfig {
        notice_ttl: Duration::ZERO,
        list_ttl: Duration::ZERO,
        reveal_ttl: Duration::ZERO,
        ..DispatcherConfig::default()
    };
    let fx = Fixture::new(Duration::from_millis(10), config).await;

    fx.send(1, "/creds bank alice secret1").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The challenge has expired: this is an ordinary command again.
    fx.send(2, "/listcreds").await;
    let last = fx.messenger.last_message().await.unwrap();
    assert!(last.text.contains("No credentials stored"));
    assert!(!fx.messenger.sent_text().await.contains("✅ Credentials stored"));
}

#[tokio::test]
async fn malformed_commands_report_usage() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice").await;
    assert!(fx.messenger.last_message().await.unwrap().text.contains("Usage: /creds"));

    fx.send(2, "/show seven").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("valid credential number")
    );

    fx.send(3, "/context recipe").await;
    assert!(fx.messenger.last_message().await.unwrap().text.contains("Usage: /context"));
}

#[tokio::test]
async fn show_unknown_credential_reports_not_found_and_stays_idle() {
    let fx = Fixture::standard().await;

    fx.send(1, "/show 99").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("Credential not found")
    );

    // No challenge was begun: the next message is ordinary chatter.
    fx.messenger.clear().await;
    fx.send(2, "some passphrase-looking text").await;
    assert!(fx.messenger.sent_messages().await.is_empty());
}

#[tokio::test]
async fn context_store_and_grounded_query() {
    let fx = Fixture::standard().await;

    // Programmed vectors: stored content and query are nearly parallel.
    fx.embedder.set_embedding("bake at 350", vec![1.0, 0.0]);
    fx.embedder.set_embedding("baking temperature", vec![1.0, 0.1]);

    fx.send(1, "/context recipe bake at 350").await;
    assert!(fx.messenger.last_message().await.unwrap().text.contains("✅ Context stored"));

    fx.send(2, "/getcontext baking temperature").await;
    let answer = fx.messenger.last_message().await.unwrap();
    assert_eq!(answer.text, "grounded answer");

    let prompts = fx.generator.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("bake at 350"));
    assert!(prompts[0].contains("baking temperature"));
}

#[tokio::test]
async fn unrelated_query_reports_no_relevant_context() {
    let fx = Fixture::standard().await;

    fx.embedder.set_embedding("bake at 350", vec![1.0, 0.0]);
    // The default mock embedding is orthogonal to the stored vector.
    fx.send(1, "/context recipe bake at 350").await;
    fx.send(2, "/getcontext quantum physics").await;

    let last = fx.messenger.last_message().await.unwrap();
    assert!(last.text.contains("No relevant context found"));
    assert!(fx.generator.prompts().await.is_empty());
}

#[tokio::test]
async fn query_on_empty_scope_reports_no_relevant_context() {
    let fx = Fixture::standard().await;
    fx.send(1, "/getcontext anything at all").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("No relevant context found")
    );
}

#[tokio::test]
async fn list_credentials_formats_numbered_lines() {
    let fx = Fixture::standard().await;

    fx.send(1, "/creds bank alice secret1").await;
    fx.send(2, "k1").await;
    fx.send(3, "/creds email bob hunter2").await;
    fx.send(4, "k2").await;

    fx.send(5, "/listcreds").await;
    let list = fx.messenger.last_message().await.unwrap();
    assert!(list.text.contains("1. bank (alice)"));
    assert!(list.text.contains("2. email (bob)"));
}

#[tokio::test]
async fn list_contexts_titles_only_until_filtered() {
    let fx = Fixture::standard().await;

    fx.send(1, "/context recipe bake at 350").await;
    fx.send(2, "/context wifi router password on the shelf").await;

    fx.send(3, "/listcontext").await;
    let overview = fx.messenger.last_message().await.unwrap();
    assert!(overview.text.contains("📌 recipe"));
    assert!(overview.text.contains("📌 wifi"));
    assert!(!overview.text.contains("bake at 350"));

    fx.send(4, "/listcontext recipe").await;
    let filtered = fx.messenger.last_message().await.unwrap();
    assert!(filtered.text.contains("📌 recipe"));
    assert!(filtered.text.contains("bake at 350"));
    assert!(!filtered.text.contains("wifi"));

    fx.send(5, "/listcontext nomatch").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("No contexts found matching \"nomatch\"")
    );
}

#[tokio::test]
async fn embedder_failure_is_reported_not_fatal() {
    let fx = Fixture::standard().await;

    fx.embedder.fail(true);
    fx.send(1, "/context recipe bake at 350").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("Failed to store context")
    );

    // The dispatcher keeps working afterwards.
    fx.embedder.fail(false);
    fx.send(2, "/context recipe bake at 350").await;
    assert!(fx.messenger.last_message().await.unwrap().text.contains("✅ Context stored"));
}

#[tokio::test]
async fn generator_failure_is_reported_not_fatal() {
    let fx = Fixture::standard().await;

    fx.embedder.set_embedding("bake at 350", vec![1.0, 0.0]);
    fx.embedder.set_embedding("baking temperature", vec![1.0, 0.1]);
    fx.send(1, "/context recipe bake at 350").await;

    fx.generator.fail(true);
    fx.send(2, "/getcontext baking temperature").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("Failed to process context with AI")
    );
}

#[tokio::test]
async fn chatter_is_a_deliberate_no_op() {
    let fx = Fixture::standard().await;
    fx.send(1, "good morning bot").await;
    fx.send(2, "/unknowncommand").await;
    assert!(fx.messenger.sent_messages().await.is_empty());
}

#[tokio::test]
async fn start_and_help_send_static_texts() {
    let fx = Fixture::standard().await;

    fx.send(1, "/start").await;
    assert!(fx.messenger.last_message().await.unwrap().text.contains("Welcome"));

    fx.send(2, "/help").await;
    assert!(
        fx.messenger
            .last_message()
            .await
            .unwrap()
            .text
            .contains("Available commands")
    );
}

#[tokio::test]
async fn notices_are_deleted_after_their_ttl() {
    let config = DispatcherConfig {
        notice_ttl: Duration::from_millis(10),
        list_ttl: Duration::ZERO,
        reveal_ttl: Duration::ZERO,
        ..DispatcherConfig::default()
    };
    let fx = Fixture::new(Duration::from_secs(60), config).await;

    fx.send(1, "/listcreds").await;
    let notice = fx.messenger.last_message().await.unwrap();
    assert!(notice.text.contains("No credentials stored"));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(fx.messenger.was_deleted(notice.message_id).await);
}
