// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hush bot.

use thiserror::Error;

/// The primary error type used across all Hush crates.
///
/// `Validation` and `NotFound` are reported to the user verbatim.
/// `DecryptionFailed` is deliberately detail-free: a wrong passphrase and
/// corrupted ciphertext must be indistinguishable to the caller.
#[derive(Debug, Error)]
pub enum HushError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed command arguments, reported to the user.
    #[error("{0}")]
    Validation(String),

    /// A referenced credential or context entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Authenticated decryption failed: wrong passphrase or corrupted data.
    /// The two cases are never distinguished.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Key derivation or encryption failure. Fatal to the call, propagated.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Messaging transport errors (send/delete failure, bad chat id).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding or text-generation provider errors.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HushError {
    /// Whether this error carries a message meant for the end user as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            HushError::Validation(_) | HushError::NotFound(_) | HushError::DecryptionFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decryption_failed_has_no_detail() {
        let err = HushError::DecryptionFailed;
        assert_eq!(err.to_string(), "decryption failed");
    }

    #[test]
    fn validation_and_not_found_are_user_facing() {
        assert!(HushError::Validation("usage".into()).is_user_facing());
        assert!(HushError::NotFound("credential 3".into()).is_user_facing());
        assert!(HushError::DecryptionFailed.is_user_facing());
        assert!(!HushError::Internal("boom".into()).is_user_facing());
        assert!(
            !HushError::Provider {
                message: "upstream".into(),
                source: None,
            }
            .is_user_facing()
        );
    }
}
