// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook server: receives Telegram updates and feeds them to the
//! dispatcher.
//!
//! Each update is handled within its own request; different (chat, user)
//! pairs are fully concurrent, and same-pair races are resolved inside the
//! pending registry.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, error, info};

use hush_config::HushConfig;
use hush_context::{ContextIndex, ContextStore};
use hush_core::HushError;
use hush_core::traits::{Embedder, Generator, Messenger};
use hush_core::types::{ChatId, MessageId, UserId};
use hush_dispatch::{DispatcherConfig, VaultDispatcher};
use hush_gemini::GeminiGenerator;
use hush_pending::PendingRegistry;
use hush_storage::Database;
use hush_telegram::TelegramMessenger;
use hush_vault::{CredentialStore, SecretCipher};
use hush_voyage::VoyageEmbedder;

/// Interval between janitor sweeps of the pending registry.
const JANITOR_INTERVAL: Duration = Duration::from_secs(30);

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<VaultDispatcher>,
}

/// Build the webhook router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(webhook))
        .with_state(state)
}

async fn health() -> &'static str {
    "Bot is running!"
}

async fn webhook(State(state): State<AppState>, Json(update): Json<Update>) -> StatusCode {
    match handle_update(&state, update).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            error!(error = %err, "failed to process update");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Route one Telegram update into the dispatcher.
///
/// Non-message updates and messages without text or sender are ignored.
async fn handle_update(state: &AppState, update: Update) -> Result<(), HushError> {
    let UpdateKind::Message(message) = update.kind else {
        return Ok(());
    };
    let Some(text) = message.text() else {
        debug!(msg_id = message.id.0, "ignoring non-text message");
        return Ok(());
    };
    let Some(from) = message.from.as_ref() else {
        debug!(msg_id = message.id.0, "ignoring message without sender");
        return Ok(());
    };

    let chat = ChatId(message.chat.id.0);
    let user = UserId(from.id.0 as i64);
    let message_id = MessageId(i64::from(message.id.0));

    state
        .dispatcher
        .handle_message(chat, user, message_id, text)
        .await
}

/// Wire up all collaborators from config and serve the webhook until the
/// process is stopped.
pub async fn run(config: &HushConfig) -> Result<(), HushError> {
    let bot_token = config
        .telegram
        .bot_token
        .as_deref()
        .ok_or_else(|| HushError::Config("telegram.bot_token is required".into()))?;
    let voyage_key = config
        .voyage
        .api_key
        .as_deref()
        .ok_or_else(|| HushError::Config("voyage.api_key is required".into()))?;
    let gemini_key = config
        .gemini
        .api_key
        .as_deref()
        .ok_or_else(|| HushError::Config("gemini.api_key is required".into()))?;

    let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot_token)?);
    let embedder: Arc<dyn Embedder> = Arc::new(VoyageEmbedder::new(
        voyage_key,
        config.voyage.model.clone(),
        config.voyage.api_base.clone(),
    )?);
    let generator: Arc<dyn Generator> = Arc::new(GeminiGenerator::new(
        gemini_key,
        config.gemini.model.clone(),
        config.gemini.api_base.clone(),
    )?);

    let db = Database::open(&config.storage.db_path).await?;
    let conn = db.connection().clone();
    let credentials = Arc::new(CredentialStore::new(conn.clone()));
    let contexts = Arc::new(ContextIndex::new(Arc::new(ContextStore::new(conn))));

    let registry = Arc::new(PendingRegistry::new(Duration::from_secs(
        config.vault.pending_ttl_secs,
    )));
    let _janitor = registry.spawn_janitor(JANITOR_INTERVAL);

    let dispatcher = Arc::new(VaultDispatcher::new(
        messenger,
        embedder,
        generator,
        registry,
        credentials,
        contexts,
        SecretCipher::new(config.vault.kdf_iterations),
        DispatcherConfig {
            similarity_threshold: config.context.similarity_threshold,
            top_k: config.context.top_k,
            ..DispatcherConfig::default()
        },
    ));

    let app = router(AppState { dispatcher });
    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .map_err(|e| HushError::Channel {
            message: format!("failed to bind to {}: {e}", config.server.listen_addr),
            source: Some(Box::new(e)),
        })?;

    info!("webhook server listening on {}", config.server.listen_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| HushError::Channel {
            message: format!("webhook server error: {e}"),
            source: Some(Box::new(e)),
        })
}
