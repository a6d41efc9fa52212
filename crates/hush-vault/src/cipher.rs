// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-keyed AES-256-GCM encryption of individual secrets.
//!
//! Every call to [`SecretCipher::encrypt`] draws a fresh random salt and a
//! fresh random 96-bit nonce from the system CSPRNG. Nonce reuse would be
//! catastrophic for GCM security.
//!
//! Blob layout: `base64( salt(16) || nonce(12) || ciphertext || tag(16) )`.
//! The blob is self-describing; nothing besides the passphrase is needed to
//! decrypt it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hush_core::HushError;
use ring::aead::{Aad, AES_256_GCM, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

use crate::kdf::{self, SALT_LEN};

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
const TAG_LEN: usize = 16;

/// PBKDF2 iteration count used in production.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Stateless encrypt/decrypt primitive keyed by a user passphrase.
///
/// The passphrase is never stored; it exists only for the duration of a call.
/// Decryption failure is a single undifferentiated [`HushError::DecryptionFailed`]:
/// a wrong passphrase and corrupted ciphertext are indistinguishable by design.
#[derive(Debug, Clone, Copy)]
pub struct SecretCipher {
    iterations: u32,
}

impl Default for SecretCipher {
    fn default() -> Self {
        Self::new(DEFAULT_KDF_ITERATIONS)
    }
}

impl SecretCipher {
    /// Creates a cipher with the given PBKDF2 iteration count.
    ///
    /// Tests pass a low count; production uses [`DEFAULT_KDF_ITERATIONS`].
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Encrypt `plaintext` under a key derived from `passphrase`.
    ///
    /// Returns an opaque base64 blob embedding the salt and nonce used for
    /// this call. Derivation or encryption failures propagate as
    /// [`HushError::Crypto`].
    pub fn encrypt(&self, plaintext: &[u8], passphrase: &str) -> Result<String, HushError> {
        let salt = kdf::generate_salt()?;
        let key = kdf::derive_key(passphrase.as_bytes(), &salt, self.iterations)?;

        let rng = SystemRandom::new();
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill(&mut nonce_bytes)
            .map_err(|_| HushError::Crypto("failed to generate random nonce".to_string()))?;

        let unbound = UnboundKey::new(&AES_256_GCM, key.as_ref())
            .map_err(|_| HushError::Crypto("failed to create AES-256-GCM key".to_string()))?;
        let sealing_key = LessSafeKey::new(unbound);
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // Seal in place: the buffer is extended with the authentication tag.
        let mut in_out = plaintext.to_vec();
        sealing_key
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| HushError::Crypto("AES-256-GCM encryption failed".to_string()))?;

        let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + in_out.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&in_out);

        Ok(BASE64.encode(blob))
    }

    /// Decrypt a blob produced by [`SecretCipher::encrypt`].
    ///
    /// Any failure (malformed base64, truncated blob, wrong passphrase,
    /// tampered ciphertext) maps to [`HushError::DecryptionFailed`] with no
    /// further detail. No partial plaintext is ever returned.
    pub fn decrypt(&self, blob: &str, passphrase: &str) -> Result<Vec<u8>, HushError> {
        let raw = BASE64
            .decode(blob)
            .map_err(|_| HushError::DecryptionFailed)?;
        if raw.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            return Err(HushError::DecryptionFailed);
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let salt: [u8; SALT_LEN] = salt.try_into().map_err(|_| HushError::DecryptionFailed)?;
        let nonce_bytes: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| HushError::DecryptionFailed)?;

        let key = kdf::derive_key(passphrase.as_bytes(), &salt, self.iterations)
            .map_err(|_| HushError::DecryptionFailed)?;

        let unbound =
            UnboundKey::new(&AES_256_GCM, key.as_ref()).map_err(|_| HushError::DecryptionFailed)?;
        let opening_key = LessSafeKey::new(unbound);
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let mut in_out = ciphertext.to_vec();
        let plaintext = opening_key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| HushError::DecryptionFailed)?;

        Ok(plaintext.to_vec())
    }
}
