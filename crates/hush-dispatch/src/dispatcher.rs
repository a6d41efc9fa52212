// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two-step secret flows and context command routing.
//!
//! State per (chat, user) pair is derived entirely from the pending registry:
//! an inbound message is checked against the registry before it is parsed as
//! a command, so a live challenge always captures the next message as its
//! passphrase. A consumed or expired challenge falls through to ordinary
//! dispatch.
//!
//! Every message that ever carried a plaintext password or passphrase (the
//! store command, the passphrase reply, the bot's own prompts) is deleted
//! from the conversation after use. Deletion is best-effort only: it shrinks
//! the exposure window on an insecure transport, it does not guarantee
//! erasure.

use std::sync::Arc;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, warn};

use hush_context::ContextIndex;
use hush_core::HushError;
use hush_core::traits::{Embedder, Generator, Messenger};
use hush_core::types::{ChatId, MessageId, Scope, UserId};
use hush_pending::{Challenge, PendingRegistry};
use hush_vault::{CredentialStore, SecretCipher};

use crate::command::{self, Command};
use crate::reply;

/// Tunables for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Lifetime of short status notices before they are deleted.
    pub notice_ttl: Duration,
    /// Lifetime of list output.
    pub list_ttl: Duration,
    /// Lifetime of a revealed credential.
    pub reveal_ttl: Duration,
    /// Similarity cutoff for context queries.
    pub similarity_threshold: f32,
    /// Maximum context entries fed into a grounded answer.
    pub top_k: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(5),
            list_ttl: Duration::from_secs(15),
            reveal_ttl: Duration::from_secs(30),
            similarity_threshold: 0.5,
            top_k: 4,
        }
    }
}

/// Orchestrates the secret-capture state machine and context commands.
pub struct VaultDispatcher {
    messenger: Arc<dyn Messenger>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    registry: Arc<PendingRegistry>,
    credentials: Arc<CredentialStore>,
    contexts: Arc<ContextIndex>,
    cipher: SecretCipher,
    config: DispatcherConfig,
}

impl VaultDispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        registry: Arc<PendingRegistry>,
        credentials: Arc<CredentialStore>,
        contexts: Arc<ContextIndex>,
        cipher: SecretCipher,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            messenger,
            embedder,
            generator,
            registry,
            credentials,
            contexts,
            cipher,
            config,
        }
    }

    /// Single entry point: handle one inbound text message.
    ///
    /// All side effects (sends, deletes, persistence) are issued before the
    /// call returns; scheduled deletions of ephemeral messages run in
    /// detached tasks. Command-level failures are reported to the user and
    /// do not propagate; only a failure to emit the report itself errors.
    pub async fn handle_message(
        &self,
        chat: ChatId,
        user: UserId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), HushError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let scope = Scope::new(chat, user);

        // A live challenge captures this message as its passphrase. An
        // expired or absent one lets the message fall through to dispatch.
        if let Some(challenge) = self.registry.try_consume(scope, Instant::now()) {
            return match challenge {
                Challenge::AwaitingEncryptionKey {
                    title,
                    username,
                    password,
                    prompt_message_id,
                } => {
                    self.complete_store(
                        scope,
                        message_id,
                        text,
                        &title,
                        &username,
                        password,
                        prompt_message_id,
                    )
                    .await
                }
                Challenge::AwaitingDecryptionKey {
                    credential_id,
                    encrypted_password,
                    prompt_message_id,
                } => {
                    self.complete_reveal(
                        scope,
                        message_id,
                        text,
                        credential_id,
                        &encrypted_password,
                        prompt_message_id,
                    )
                    .await
                }
            };
        }

        match command::parse(text) {
            Ok(Some(cmd)) => self.dispatch(scope, message_id, cmd).await,
            // Not a command: deliberate no-op.
            Ok(None) => Ok(()),
            Err(err) if err.is_user_facing() => {
                self.send_notice(chat, &err.to_string()).await
            }
            Err(err) => Err(err),
        }
    }

    async fn dispatch(
        &self,
        scope: Scope,
        message_id: MessageId,
        cmd: Command,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;
        match cmd {
            Command::Start => {
                self.messenger.send_text(chat, reply::WELCOME).await?;
                Ok(())
            }
            Command::Help => {
                self.messenger.send_text(chat, reply::HELP).await?;
                Ok(())
            }
            Command::StoreCredential {
                title,
                username,
                password,
            } => {
                self.begin_store(scope, message_id, title, username, password)
                    .await
            }
            Command::ShowCredential { id } => self.begin_reveal(scope, message_id, id).await,
            Command::ListCredentials => self.list_credentials(scope).await,
            Command::StoreContext { title, content } => {
                self.store_context(scope, &title, &content).await
            }
            Command::QueryContext { prompt } => self.query_context(scope, &prompt).await,
            Command::ListContexts { filter } => {
                self.list_contexts(scope, filter.as_deref()).await
            }
        }
    }

    /// `/creds` — step one of the store flow.
    async fn begin_store(
        &self,
        scope: Scope,
        message_id: MessageId,
        title: String,
        username: String,
        password: SecretString,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;

        // The command message contains the plaintext password.
        self.best_effort_delete(chat, message_id).await;

        let prompt_message_id = self
            .messenger
            .send_text(chat, reply::PROMPT_ENCRYPTION_KEY)
            .await?;

        self.registry.begin(
            scope,
            Challenge::AwaitingEncryptionKey {
                title,
                username,
                password,
                prompt_message_id,
            },
        );
        Ok(())
    }

    /// Step two of the store flow: the message body is the passphrase.
    async fn complete_store(
        &self,
        scope: Scope,
        passphrase_message_id: MessageId,
        passphrase: &str,
        title: &str,
        username: &str,
        password: SecretString,
        prompt_message_id: MessageId,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;

        self.best_effort_delete(chat, passphrase_message_id).await;
        self.best_effort_delete(chat, prompt_message_id).await;

        // Derive-then-persist is the only order; a persistence failure after
        // derivation must not report success.
        let blob = match self
            .cipher
            .encrypt(password.expose_secret().as_bytes(), passphrase)
        {
            Ok(blob) => blob,
            Err(err) => {
                error!(%scope, error = %err, "credential encryption failed");
                return self.send_notice(chat, reply::CREDENTIALS_STORE_FAILED).await;
            }
        };
        // The plaintext password (SecretString) and the passphrase reply are
        // dropped at the end of this call.

        match self
            .credentials
            .insert(scope, title, username, &blob)
            .await
        {
            Ok(_) => self.send_notice(chat, reply::CREDENTIALS_STORED).await,
            Err(err) => {
                error!(%scope, error = %err, "credential persistence failed");
                self.send_notice(chat, reply::CREDENTIALS_STORE_FAILED).await
            }
        }
    }

    /// `/show` — step one of the reveal flow.
    async fn begin_reveal(
        &self,
        scope: Scope,
        message_id: MessageId,
        credential_id: i64,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;

        let record = match self.credentials.get(scope, credential_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                return self.send_notice(chat, reply::CREDENTIAL_NOT_FOUND).await;
            }
            Err(err) => {
                error!(%scope, error = %err, "credential lookup failed");
                return self.send_notice(chat, reply::CREDENTIALS_FETCH_FAILED).await;
            }
        };

        self.best_effort_delete(chat, message_id).await;

        let prompt_message_id = self
            .messenger
            .send_text(chat, reply::PROMPT_DECRYPTION_KEY)
            .await?;

        self.registry.begin(
            scope,
            Challenge::AwaitingDecryptionKey {
                credential_id: record.id,
                encrypted_password: record.encrypted_password,
                prompt_message_id,
            },
        );
        Ok(())
    }

    /// Step two of the reveal flow: decrypt with the supplied passphrase.
    async fn complete_reveal(
        &self,
        scope: Scope,
        passphrase_message_id: MessageId,
        passphrase: &str,
        credential_id: i64,
        encrypted_password: &str,
        prompt_message_id: MessageId,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;

        self.best_effort_delete(chat, passphrase_message_id).await;
        self.best_effort_delete(chat, prompt_message_id).await;

        // Wrong passphrase and corrupted data are one indistinguishable
        // failure. Nothing is revealed either way.
        let plaintext = match self.cipher.decrypt(encrypted_password, passphrase) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => SecretString::from(text),
                Err(_) => {
                    return self.send_notice(chat, reply::DECRYPTION_FAILED).await;
                }
            },
            Err(HushError::DecryptionFailed) => {
                return self.send_notice(chat, reply::DECRYPTION_FAILED).await;
            }
            Err(err) => {
                error!(%scope, error = %err, "credential decryption failed unexpectedly");
                return self.send_notice(chat, reply::DECRYPTION_FAILED).await;
            }
        };

        let record = match self.credentials.get(scope, credential_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                // Deleted out from under the flow by an administrator.
                return self.send_notice(chat, reply::CREDENTIAL_NOT_FOUND).await;
            }
            Err(err) => {
                error!(%scope, error = %err, "credential lookup failed");
                return self.send_notice(chat, reply::CREDENTIALS_FETCH_FAILED).await;
            }
        };

        let text =
            reply::credential_reveal(&record.title, &record.username, plaintext.expose_secret());
        self.send_ephemeral(chat, &text, self.config.reveal_ttl).await
    }

    async fn list_credentials(&self, scope: Scope) -> Result<(), HushError> {
        let chat = scope.chat_id;
        let records = match self.credentials.list(scope).await {
            Ok(records) => records,
            Err(err) => {
                error!(%scope, error = %err, "credential list failed");
                return self.send_notice(chat, reply::CREDENTIALS_FETCH_FAILED).await;
            }
        };

        if records.is_empty() {
            return self.send_notice(chat, reply::NO_CREDENTIALS).await;
        }
        self.send_ephemeral(chat, &reply::credential_list(&records), self.config.notice_ttl)
            .await
    }

    async fn store_context(
        &self,
        scope: Scope,
        title: &str,
        content: &str,
    ) -> Result<(), HushError> {
        let chat = scope.chat_id;

        let embedding = match self.embedder.embed(content).await {
            Ok(embedding) => embedding,
            Err(err) => {
                error!(%scope, error = %err, "context embedding failed");
                return self.send_notice(chat, reply::CONTEXT_STORE_FAILED).await;
            }
        };

        match self
            .contexts
            .insert(scope, Some(title), content, &embedding)
            .await
        {
            Ok(_) => self.send_notice(chat, reply::CONTEXT_STORED).await,
            Err(err) => {
                error!(%scope, error = %err, "context persistence failed");
                self.send_notice(chat, reply::CONTEXT_STORE_FAILED).await
            }
        }
    }

    async fn query_context(&self, scope: Scope, prompt: &str) -> Result<(), HushError> {
        let chat = scope.chat_id;

        let query_embedding = match self.embedder.embed(prompt).await {
            Ok(embedding) => embedding,
            Err(err) => {
                error!(%scope, error = %err, "query embedding failed");
                return self.send_notice(chat, reply::CONTEXT_QUERY_FAILED).await;
            }
        };

        let scored = match self
            .contexts
            .query_similar(
                scope,
                &query_embedding,
                self.config.similarity_threshold,
                self.config.top_k,
            )
            .await
        {
            Ok(scored) => scored,
            Err(err) => {
                error!(%scope, error = %err, "context query failed");
                return self.send_notice(chat, reply::CONTEXT_QUERY_FAILED).await;
            }
        };

        // Nothing above the threshold is an expected outcome, not a failure.
        if scored.is_empty() {
            return self.send_notice(chat, reply::NO_RELEVANT_CONTEXT).await;
        }

        let context_text = scored
            .iter()
            .map(|s| s.entry.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let answer = match self
            .generator
            .generate(&reply::grounding_prompt(&context_text, prompt))
            .await
        {
            Ok(answer) => answer,
            Err(err) => {
                error!(%scope, error = %err, "grounded generation failed");
                return self.send_notice(chat, reply::CONTEXT_QUERY_FAILED).await;
            }
        };

        self.messenger.send_text(chat, &answer).await?;
        Ok(())
    }

    async fn list_contexts(&self, scope: Scope, filter: Option<&str>) -> Result<(), HushError> {
        let chat = scope.chat_id;

        let entries = match self.contexts.list_by_title(scope, filter).await {
            Ok(entries) => entries,
            Err(err) => {
                error!(%scope, error = %err, "context list failed");
                return self.send_notice(chat, reply::CONTEXT_FETCH_FAILED).await;
            }
        };

        if entries.is_empty() {
            let text = match filter {
                Some(f) => reply::no_contexts_matching(f),
                None => reply::NO_CONTEXTS.to_string(),
            };
            return self.send_notice(chat, &text).await;
        }

        self.send_ephemeral(chat, &reply::context_list(&entries, filter), self.config.list_ttl)
            .await
    }

    /// Send a short-lived status notice.
    async fn send_notice(&self, chat: ChatId, text: &str) -> Result<(), HushError> {
        self.send_ephemeral(chat, text, self.config.notice_ttl).await
    }

    /// Send a message and schedule its deletion after `ttl`.
    ///
    /// A zero TTL sends a plain persistent message. The scheduled delete runs
    /// in a detached task and is best-effort.
    async fn send_ephemeral(
        &self,
        chat: ChatId,
        text: &str,
        ttl: Duration,
    ) -> Result<(), HushError> {
        let message_id = self.messenger.send_text(chat, text).await?;
        if ttl.is_zero() {
            return Ok(());
        }

        let messenger = Arc::clone(&self.messenger);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(err) = messenger.delete_message(chat, message_id).await {
                debug!(chat = chat.0, message = message_id.0, error = %err,
                    "scheduled message deletion failed");
            }
        });
        Ok(())
    }

    /// Delete a message, logging instead of failing: the transcript cleanup
    /// reduces exposure but is never load-bearing.
    async fn best_effort_delete(&self, chat: ChatId, message: MessageId) {
        if let Err(err) = self.messenger.delete_message(chat, message).await {
            warn!(chat = chat.0, message = message.0, error = %err,
                "message deletion failed");
        }
    }
}
