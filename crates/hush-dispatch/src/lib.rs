// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch and two-step secret flows for the Hush bot.
//!
//! [`VaultDispatcher`] is the single entry point for inbound messages: it
//! consults the pending challenge registry, parses commands, runs the
//! store/reveal state machine over [`hush_vault`], and routes context
//! commands to [`hush_context`].

pub mod command;
pub mod dispatcher;
pub mod reply;

pub use command::Command;
pub use dispatcher::{DispatcherConfig, VaultDispatcher};
