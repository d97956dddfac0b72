//! Tenant-scoped secret storage with encryption at rest.
//!
//! Secrets (third-party API tokens the frontend needs brokered) are
//! stored in the document store with their token field encrypted by
//! [`crypto::EncryptionService`] (AES-256-GCM). Plaintext tokens exist
//! only in transit; at rest only `encryptedToken` is ever written.
//!
//! The whole feature degrades gracefully: when no key material is
//! configured, [`store::SecretStore`] reports itself unavailable and
//! every operation fails with [`SecretError::EncryptionUnavailable`]
//! instead of falling back to plaintext storage.

pub mod crypto;
pub mod error;
pub mod store;

pub use crypto::EncryptionService;
pub use error::{SecretError, SecretResult};
pub use store::{Secret, SecretStore};
