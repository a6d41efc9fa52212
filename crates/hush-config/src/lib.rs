// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Hush bot.
//!
//! Layered TOML configuration via Figment with `HUSH_` env overrides and a
//! typed model with per-field defaults.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HushConfig;
