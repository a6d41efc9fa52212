// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Hush bot.
//!
//! Owns the connection lifecycle and schema migrations. Domain crates
//! (`hush-vault`, `hush-context`) run their own queries over the shared
//! [`Database`] connection.

pub mod database;

pub use database::Database;
