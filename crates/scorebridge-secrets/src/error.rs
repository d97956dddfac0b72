//! Secret storage error types.

use scorebridge_docstore::DocStoreError;
use thiserror::Error;

pub type SecretResult<T> = Result<T, SecretError>;

/// Errors from secret storage and the encryption layer beneath it.
#[derive(Debug, Error)]
pub enum SecretError {
    /// No encryption key material is configured; the whole secrets
    /// feature is disabled rather than degraded to plaintext.
    #[error("secret encryption is not configured")]
    EncryptionUnavailable,

    /// Invalid encryption key format.
    #[error("invalid encryption key: {0}")]
    InvalidKey(String),

    /// Encryption operation failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed: wrong key, truncated or tampered ciphertext,
    /// or garbage input. The detail never includes ciphertext.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// The requested secret does not exist for this tenant.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The request failed validation before touching storage.
    #[error("invalid secret: {0}")]
    Validation(String),

    /// A stored record is missing required fields.
    #[error("stored secret record is malformed: {0}")]
    Corrupt(String),

    /// Underlying document store failure.
    #[error(transparent)]
    Store(#[from] DocStoreError),
}
