//! Tenant-scoped secret store over the document store.

use crate::crypto::EncryptionService;
use crate::error::{SecretError, SecretResult};
use scorebridge_core::TenantId;
use scorebridge_docstore::{DocumentStore, Query};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const COLLECTION: &str = "secrets";

/// A secret as seen by callers: plaintext token in transit only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Unique name within the tenant; doubles as the document id.
    pub name: String,
    pub display_name: Option<String>,
    pub environment_id: Option<String>,
    pub token: String,
}

/// The at-rest shape: the token field is replaced by its encrypted form
/// before anything touches storage.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSecret {
    name: String,
    display_name: Option<String>,
    environment_id: Option<String>,
    encrypted_token: String,
}

/// Tenant-scoped secret storage, keyed by secret name.
///
/// Constructed with or without an [`EncryptionService`]; without one,
/// every operation fails with
/// [`SecretError::EncryptionUnavailable`] so the feature is cleanly
/// off instead of silently storing plaintext.
#[derive(Clone)]
pub struct SecretStore {
    store: Arc<dyn DocumentStore>,
    encryption: Option<Arc<EncryptionService>>,
}

impl SecretStore {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, encryption: Option<Arc<EncryptionService>>) -> Self {
        Self { store, encryption }
    }

    /// Whether the secrets feature is usable at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.encryption.is_some()
    }

    fn encryption(&self) -> SecretResult<&EncryptionService> {
        self.encryption
            .as_deref()
            .ok_or(SecretError::EncryptionUnavailable)
    }

    /// Create or replace a secret. Returns `true` when the secret was
    /// newly created, `false` when an existing one was overwritten.
    pub async fn upsert(&self, tenant_id: &TenantId, secret: &Secret) -> SecretResult<bool> {
        let encryption = self.encryption()?;
        validate(secret)?;

        let stored = StoredSecret {
            name: secret.name.clone(),
            display_name: secret.display_name.clone(),
            environment_id: secret.environment_id.clone(),
            encrypted_token: encryption.encrypt(&secret.token)?,
        };
        let data = serde_json::to_value(&stored)
            .map_err(|e| SecretError::Corrupt(format!("failed to serialize record: {e}")))?;

        let existed = self
            .store
            .exists(tenant_id, COLLECTION, &secret.name)
            .await?;
        self.store
            .set(tenant_id, COLLECTION, &secret.name, &data)
            .await?;
        Ok(!existed)
    }

    /// Fetch one secret with its token decrypted.
    pub async fn get(&self, tenant_id: &TenantId, name: &str) -> SecretResult<Secret> {
        let encryption = self.encryption()?;
        let data = self
            .store
            .get(tenant_id, COLLECTION, name)
            .await?
            .ok_or_else(|| SecretError::NotFound(name.to_string()))?;
        decrypt_record(encryption, &data)
    }

    /// List every secret of a tenant with tokens decrypted.
    ///
    /// A record that fails to decrypt is skipped with a warning rather
    /// than failing the whole listing; one bad row must not hide the
    /// rest of the tenant's secrets.
    pub async fn list(&self, tenant_id: &TenantId) -> SecretResult<Vec<Secret>> {
        let encryption = self.encryption()?;
        let documents = self
            .store
            .query(tenant_id, COLLECTION, &Query::new())
            .await?;

        let mut secrets = Vec::with_capacity(documents.len());
        for document in documents {
            match decrypt_record(encryption, &document.data) {
                Ok(secret) => secrets.push(secret),
                Err(err) => {
                    tracing::warn!(
                        secret_name = %document.id,
                        error = %err,
                        "skipping secret that could not be decrypted"
                    );
                }
            }
        }
        Ok(secrets)
    }

    /// Whether a secret with this name exists.
    pub async fn exists(&self, tenant_id: &TenantId, name: &str) -> SecretResult<bool> {
        self.encryption()?;
        Ok(self.store.exists(tenant_id, COLLECTION, name).await?)
    }

    /// Delete a secret. Missing secrets are an error, matching the
    /// 404-then-delete contract of the HTTP surface.
    pub async fn delete(&self, tenant_id: &TenantId, name: &str) -> SecretResult<()> {
        self.encryption()?;
        if !self.store.delete(tenant_id, COLLECTION, name).await? {
            return Err(SecretError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

fn validate(secret: &Secret) -> SecretResult<()> {
    if secret.name.trim().is_empty() {
        return Err(SecretError::Validation("name must not be empty".into()));
    }
    if secret.name.contains('/') {
        return Err(SecretError::Validation(
            "name must not contain '/'".into(),
        ));
    }
    Ok(())
}

fn decrypt_record(encryption: &EncryptionService, data: &serde_json::Value) -> SecretResult<Secret> {
    let stored: StoredSecret = serde_json::from_value(data.clone())
        .map_err(|e| SecretError::Corrupt(e.to_string()))?;
    let token = encryption.decrypt(&stored.encrypted_token)?;
    Ok(Secret {
        name: stored.name,
        display_name: stored.display_name,
        environment_id: stored.environment_id,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebridge_docstore::MemoryStore;
    use serde_json::json;

    fn tenant() -> TenantId {
        TenantId::new("t1")
    }

    fn secret(name: &str, token: &str) -> Secret {
        Secret {
            name: name.to_string(),
            display_name: Some(format!("{name} display")),
            environment_id: Some("env1".to_string()),
            token: token.to_string(),
        }
    }

    fn available_store() -> (SecretStore, Arc<MemoryStore>) {
        let docs = Arc::new(MemoryStore::new());
        let encryption = Arc::new(EncryptionService::from_master_secret("test-master"));
        (
            SecretStore::new(docs.clone(), Some(encryption)),
            docs,
        )
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips_plaintext() {
        let (store, _) = available_store();
        let created = store.upsert(&tenant(), &secret("api", "tok-123")).await.unwrap();
        assert!(created);

        let fetched = store.get(&tenant(), "api").await.unwrap();
        assert_eq!(fetched.token, "tok-123");
        assert_eq!(fetched.display_name.as_deref(), Some("api display"));
    }

    #[tokio::test]
    async fn token_is_never_stored_in_plaintext() {
        let (store, docs) = available_store();
        store.upsert(&tenant(), &secret("api", "tok-123")).await.unwrap();

        let raw = docs.get(&tenant(), "secrets", "api").await.unwrap().unwrap();
        assert!(raw.get("token").is_none());
        let encrypted = raw["encryptedToken"].as_str().unwrap();
        assert!(!encrypted.contains("tok-123"));
    }

    #[tokio::test]
    async fn upsert_overwrite_reports_not_created() {
        let (store, _) = available_store();
        assert!(store.upsert(&tenant(), &secret("api", "v1")).await.unwrap());
        assert!(!store.upsert(&tenant(), &secret("api", "v2")).await.unwrap());
        assert_eq!(store.get(&tenant(), "api").await.unwrap().token, "v2");
    }

    #[tokio::test]
    async fn list_skips_undecryptable_records() {
        let (store, docs) = available_store();
        store.upsert(&tenant(), &secret("good", "tok")).await.unwrap();
        docs.set(
            &tenant(),
            "secrets",
            "bad",
            &json!({"name": "bad", "encryptedToken": "garbage"}),
        )
        .await
        .unwrap();

        let listed = store.list(&tenant()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "good");
    }

    #[tokio::test]
    async fn tenants_do_not_see_each_other() {
        let (store, _) = available_store();
        store.upsert(&TenantId::new("t1"), &secret("api", "tok")).await.unwrap();

        assert!(matches!(
            store.get(&TenantId::new("t2"), "api").await,
            Err(SecretError::NotFound(_))
        ));
        assert!(store.list(&TenantId::new("t2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (store, _) = available_store();
        assert!(matches!(
            store.delete(&tenant(), "nope").await,
            Err(SecretError::NotFound(_))
        ));

        store.upsert(&tenant(), &secret("api", "tok")).await.unwrap();
        store.delete(&tenant(), "api").await.unwrap();
        assert!(!store.exists(&tenant(), "api").await.unwrap());
    }

    #[tokio::test]
    async fn unavailable_store_refuses_every_operation() {
        let docs = Arc::new(MemoryStore::new());
        let store = SecretStore::new(docs, None);
        assert!(!store.is_available());

        assert!(matches!(
            store.upsert(&tenant(), &secret("api", "tok")).await,
            Err(SecretError::EncryptionUnavailable)
        ));
        assert!(matches!(
            store.get(&tenant(), "api").await,
            Err(SecretError::EncryptionUnavailable)
        ));
        assert!(matches!(
            store.list(&tenant()).await,
            Err(SecretError::EncryptionUnavailable)
        ));
        assert!(matches!(
            store.delete(&tenant(), "api").await,
            Err(SecretError::EncryptionUnavailable)
        ));
    }

    #[tokio::test]
    async fn validation_rejects_bad_names() {
        let (store, _) = available_store();
        assert!(matches!(
            store.upsert(&tenant(), &secret("", "tok")).await,
            Err(SecretError::Validation(_))
        ));
        assert!(matches!(
            store.upsert(&tenant(), &secret("a/b", "tok")).await,
            Err(SecretError::Validation(_))
        ));
    }
}
