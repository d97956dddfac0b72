//! The `DocumentStore` trait.

use crate::error::DocStoreResult;
use crate::query::Query;
use async_trait::async_trait;
use scorebridge_core::TenantId;
use serde_json::{Map, Value};

/// A document returned from a query: its id plus the stored JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Tenant-partitioned JSON document storage.
///
/// Collection names are opaque strings; path-shaped names are allowed.
/// Every operation is scoped to one tenant and can never observe
/// another tenant's documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a document body, `None` if it does not exist.
    async fn get(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<Option<Value>>;

    /// Writes a full document body, creating or replacing it.
    async fn set(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        data: &Value,
    ) -> DocStoreResult<()>;

    /// Merges top-level fields into an existing document.
    ///
    /// Fails with [`crate::DocStoreError::NotFound`] when the document
    /// does not exist; partial updates never create documents.
    async fn update(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        patch: &Map<String, Value>,
    ) -> DocStoreResult<()>;

    /// Deletes a document. Returns whether it existed.
    async fn delete(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool>;

    /// Whether a document exists.
    async fn exists(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool>;

    /// Runs a filtered query over one collection.
    async fn query(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        query: &Query,
    ) -> DocStoreResult<Vec<Document>>;
}
