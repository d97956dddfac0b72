//! AES-256-GCM token encryption.
//!
//! Output format: `base64(nonce || ciphertext)` with a random 96-bit
//! nonce per encryption, so encrypting the same plaintext twice never
//! yields the same token. Key material comes either from an explicit
//! base64 key or is derived from a master secret with PBKDF2.

use crate::error::{SecretError, SecretResult};
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// Length of the AES-256 key in bytes.
const KEY_LENGTH: usize = 32;
/// Length of the GCM nonce in bytes.
const NONCE_LENGTH: usize = 12;
/// PBKDF2 iteration count for master-secret key derivation.
const PBKDF2_ITERATIONS: u32 = 100_000;
/// Fixed derivation salt. The derived key must be stable across
/// restarts or every stored secret becomes undecryptable, so the salt
/// cannot be random; the master secret itself carries the entropy.
const PBKDF2_SALT: &[u8] = b"scorebridge-secret-store";

/// Stateless AES-256-GCM encryption over textual tokens.
pub struct EncryptionService {
    key: [u8; KEY_LENGTH],
}

impl std::fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionService([redacted])")
    }
}

impl EncryptionService {
    /// Create a service from a base64-encoded 32-byte key
    /// (`openssl rand -base64 32`).
    pub fn from_base64_key(encoded: &str) -> SecretResult<Self> {
        let key_bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| SecretError::InvalidKey(format!("invalid base64 key: {e}")))?;

        if key_bytes.len() != KEY_LENGTH {
            return Err(SecretError::InvalidKey(format!(
                "key must be {KEY_LENGTH} bytes, got {}",
                key_bytes.len()
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&key_bytes);
        Ok(Self { key })
    }

    /// Derive a key from a master secret with PBKDF2-HMAC-SHA256.
    ///
    /// Same master secret, same key; this is what keeps previously
    /// stored tokens decryptable across deployments.
    #[must_use]
    pub fn from_master_secret(master_secret: &str) -> Self {
        let mut key = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(
            master_secret.as_bytes(),
            PBKDF2_SALT,
            PBKDF2_ITERATIONS,
            &mut key,
        );
        Self { key }
    }

    /// Encrypt a token. Returns `base64(nonce || ciphertext)`.
    pub fn encrypt(&self, plaintext: &str) -> SecretResult<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SecretError::EncryptionFailed(format!("failed to create cipher: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| SecretError::EncryptionFailed(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(&combined))
    }

    /// Decrypt a `base64(nonce || ciphertext)` token.
    pub fn decrypt(&self, encrypted: &str) -> SecretResult<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SecretError::DecryptionFailed(format!("failed to create cipher: {e}")))?;

        let combined = BASE64
            .decode(encrypted)
            .map_err(|e| SecretError::DecryptionFailed(format!("invalid base64: {e}")))?;

        if combined.len() < NONCE_LENGTH {
            return Err(SecretError::DecryptionFailed(
                "encrypted data too short".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LENGTH);
        let nonce_array: [u8; NONCE_LENGTH] = nonce_bytes
            .try_into()
            .map_err(|_| SecretError::DecryptionFailed("invalid nonce length".to_string()))?;
        let nonce = Nonce::from(nonce_array);

        let plaintext_bytes = cipher
            .decrypt(&nonce, ciphertext)
            .map_err(|_| SecretError::DecryptionFailed("authentication failed".to_string()))?;

        String::from_utf8(plaintext_bytes)
            .map_err(|e| SecretError::DecryptionFailed(format!("invalid UTF-8: {e}")))
    }
}
