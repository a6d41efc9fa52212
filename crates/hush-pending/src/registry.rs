// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(chat, user) pending challenge map with TTL and consume-once reads.
//!
//! A challenge marks "the next message from this pair is a passphrase for
//! operation X". Entries live only in process memory: the window they buffer
//! is seconds wide, so loss on restart is acceptable.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use hush_core::types::{MessageId, Scope};
use secrecy::SecretString;
use tracing::{debug, trace};

/// An outstanding secret operation awaiting a passphrase.
///
/// The plaintext password in the store flow is held as a [`SecretString`] so
/// it is zeroed on drop and redacted from Debug output.
#[derive(Debug, Clone)]
pub enum Challenge {
    /// A store-credential flow waiting for the encryption passphrase.
    AwaitingEncryptionKey {
        title: String,
        username: String,
        password: SecretString,
        prompt_message_id: MessageId,
    },
    /// A show-credential flow waiting for the decryption passphrase.
    AwaitingDecryptionKey {
        credential_id: i64,
        encrypted_password: String,
        prompt_message_id: MessageId,
    },
}

struct PendingEntry {
    challenge: Challenge,
    created_at: Instant,
}

/// Registry of pending challenges, at most one per (chat, user) pair.
///
/// Operations on a single pair are atomic: the sharded map locks the entry
/// for the duration of an insert or remove, so a concurrent `begin` and
/// `try_consume` for the same pair serialize. Different pairs never contend.
pub struct PendingRegistry {
    ttl: Duration,
    entries: DashMap<Scope, PendingEntry>,
}

impl PendingRegistry {
    /// Creates a registry whose challenges expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Store a challenge for the pair, timestamped now.
    ///
    /// Overwrites any prior challenge for the same pair (last-writer-wins).
    pub fn begin(&self, scope: Scope, challenge: Challenge) {
        debug!(%scope, "pending challenge registered");
        self.entries.insert(
            scope,
            PendingEntry {
                challenge,
                created_at: Instant::now(),
            },
        );
    }

    /// Remove and return the pair's challenge if one exists and is fresh.
    ///
    /// Consume-once: a second call immediately after returns `None`. An
    /// expired entry is dropped and `None` is returned; expired challenges
    /// are never handed to the caller.
    pub fn try_consume(&self, scope: Scope, now: Instant) -> Option<Challenge> {
        let (_, entry) = self.entries.remove(&scope)?;
        if now.duration_since(entry.created_at) <= self.ttl {
            debug!(%scope, "pending challenge consumed");
            Some(entry.challenge)
        } else {
            debug!(%scope, "pending challenge expired, dropped on lookup");
            None
        }
    }

    /// Drop every expired entry.
    ///
    /// Expiry is otherwise lazy (checked on consume), so pairs that never
    /// send another message would accumulate; the janitor bounds that.
    pub fn sweep(&self, now: Instant) {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.created_at) <= self.ttl);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "swept expired pending challenges");
        }
    }

    /// Number of entries currently held, including not-yet-swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawn a background task sweeping expired entries every `interval`.
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn spawn_janitor(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                trace!("pending registry janitor tick");
                registry.sweep(Instant::now());
            }
        })
    }
}
