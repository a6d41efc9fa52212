// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a passphrase.

use std::num::NonZeroU32;

use hush_core::HushError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Length of the per-record random salt.
pub const SALT_LEN: usize = 16;

/// Derive a 32-byte key from a passphrase.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Zeroizing<[u8; 32]>, HushError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| HushError::Crypto("KDF iteration count must be nonzero".to_string()))?;

    let mut output = Zeroizing::new([0u8; 32]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        passphrase,
        output.as_mut(),
    );
    Ok(output)
}

/// Generate a random salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], HushError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| HushError::Crypto("failed to generate random salt".to_string()))?;
    Ok(salt)
}
