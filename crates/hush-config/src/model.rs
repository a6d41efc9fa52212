// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hush bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Hush configuration.
///
/// Loaded from a TOML file with `HUSH_` environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HushConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Embedding provider settings.
    #[serde(default)]
    pub voyage: VoyageConfig,

    /// Text-generation provider settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Secret-capture flow settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Semantic context retrieval settings.
    #[serde(default)]
    pub context: ContextConfig,

    /// Webhook server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "hush".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token from @BotFather. Required to run the bot.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Embedding provider configuration (Voyage-style API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoyageConfig {
    /// API key. Required for context commands.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Embedding model identifier.
    #[serde(default = "default_voyage_model")]
    pub model: String,

    /// API base URL, overridable for testing.
    #[serde(default = "default_voyage_base")]
    pub api_base: String,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_voyage_model(),
            api_base: default_voyage_base(),
        }
    }
}

fn default_voyage_model() -> String {
    "voyage-3".to_string()
}

fn default_voyage_base() -> String {
    "https://api.voyageai.com".to_string()
}

/// Text-generation provider configuration (Gemini-style API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Required for `/getcontext`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Generation model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL, overridable for testing.
    #[serde(default = "default_gemini_base")]
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            api_base: default_gemini_base(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("hush/hush.db").to_string_lossy().into_owned())
        .unwrap_or_else(|| "hush.db".to_string())
}

/// Secret-capture flow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Seconds a pending passphrase challenge stays valid.
    #[serde(default = "default_pending_ttl_secs")]
    pub pending_ttl_secs: u64,

    /// PBKDF2-HMAC-SHA256 iteration count for key derivation.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            pending_ttl_secs: default_pending_ttl_secs(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

fn default_pending_ttl_secs() -> u64 {
    60
}

fn default_kdf_iterations() -> u32 {
    100_000
}

/// Semantic context retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Cosine similarity cutoff; entries at or below it are discarded.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Maximum number of context entries returned per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            top_k: default_top_k(),
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.5
}

fn default_top_k() -> usize {
    4
}

/// Webhook server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the webhook server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}
