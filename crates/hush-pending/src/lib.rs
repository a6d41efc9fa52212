// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-lived passphrase challenge registry for the Hush bot.
//!
//! Holds at most one outstanding challenge per (chat, user) pair, with a
//! fixed TTL, consume-once reads, and a janitor task for proactive expiry.

pub mod registry;

pub use registry::{Challenge, PendingRegistry};
