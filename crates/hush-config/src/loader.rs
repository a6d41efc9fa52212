// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./hush.toml` and `~/.config/hush/hush.toml` with environment
//! variable overrides via the `HUSH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HushConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `~/.config/hush/hush.toml` (user XDG config)
/// 3. `./hush.toml` (local directory)
/// 4. `HUSH_*` environment variables
pub fn load_config() -> Result<HushConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HushConfig::default()))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hush/hush.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hush.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup).
///
/// Used for testing and explicit inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HushConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HushConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HushConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HushConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HUSH_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("HUSH_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("voyage_", "voyage.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("vault_", "vault.", 1)
            .replacen("context_", "context.", 1)
            .replacen("server_", "server.", 1);
        mapped.into()
    })
}
