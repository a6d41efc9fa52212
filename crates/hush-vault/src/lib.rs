// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-encrypted credential storage for the Hush bot.
//!
//! [`SecretCipher`] derives a key from the user's passphrase with
//! PBKDF2-HMAC-SHA256 and seals the secret with AES-256-GCM; the passphrase
//! is never persisted and the plaintext never stored. [`CredentialStore`]
//! holds the resulting opaque blobs alongside the clear title and username.

pub mod cipher;
pub mod kdf;
pub mod store;

pub use cipher::{DEFAULT_KDF_ITERATIONS, SecretCipher};
pub use store::{CredentialRecord, CredentialStore};
