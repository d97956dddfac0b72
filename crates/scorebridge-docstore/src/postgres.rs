//! Postgres JSONB `DocumentStore` backend.
//!
//! One `documents` table holds every collection, keyed by
//! `(tenant_id, collection, doc_id)` with the body in a JSONB column.
//! Subcollection names arrive pre-folded into the collection segment,
//! so nesting needs no extra schema.

use crate::error::{DocStoreError, DocStoreResult};
use crate::query::{Filter, Query, SortDirection};
use crate::store::{Document, DocumentStore};
use async_trait::async_trait;
use scorebridge_core::TenantId;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row};

/// Document store over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocStore {
    pool: PgPool,
}

impl PgDocStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocStore {
    async fn get(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<Option<Value>> {
        let data = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents
             WHERE tenant_id = $1 AND collection = $2 AND doc_id = $3",
        )
        .bind(tenant_id.as_str())
        .bind(collection)
        .bind(doc_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(data)
    }

    async fn set(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        data: &Value,
    ) -> DocStoreResult<()> {
        sqlx::query(
            "INSERT INTO documents (tenant_id, collection, doc_id, data)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (tenant_id, collection, doc_id)
             DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
        )
        .bind(tenant_id.as_str())
        .bind(collection)
        .bind(doc_id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        patch: &Map<String, Value>,
    ) -> DocStoreResult<()> {
        // jsonb || merges top-level keys, same as the in-memory backend.
        let result = sqlx::query(
            "UPDATE documents SET data = data || $4, updated_at = now()
             WHERE tenant_id = $1 AND collection = $2 AND doc_id = $3
               AND jsonb_typeof(data) = 'object'",
        )
        .bind(tenant_id.as_str())
        .bind(collection)
        .bind(doc_id)
        .bind(Value::Object(patch.clone()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if self.exists(tenant_id, collection, doc_id).await? {
                return Err(DocStoreError::not_an_object(collection, doc_id));
            }
            return Err(DocStoreError::not_found(collection, doc_id));
        }
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool> {
        let result = sqlx::query(
            "DELETE FROM documents
             WHERE tenant_id = $1 AND collection = $2 AND doc_id = $3",
        )
        .bind(tenant_id.as_str())
        .bind(collection)
        .bind(doc_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM documents
                 WHERE tenant_id = $1 AND collection = $2 AND doc_id = $3
             )",
        )
        .bind(tenant_id.as_str())
        .bind(collection)
        .bind(doc_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn query(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        query: &Query,
    ) -> DocStoreResult<Vec<Document>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "SELECT doc_id, data FROM documents WHERE tenant_id = ",
        );
        builder.push_bind(tenant_id.as_str());
        builder.push(" AND collection = ");
        builder.push_bind(collection);

        for filter in &query.filters {
            match filter {
                Filter::Eq { field, value } => {
                    builder.push(" AND data -> ");
                    builder.push_bind(field.as_str());
                    builder.push(" = ");
                    builder.push_bind(value.clone());
                }
                Filter::ArrayContains { field, value } => {
                    builder.push(" AND data -> ");
                    builder.push_bind(field.as_str());
                    builder.push(" @> ");
                    builder.push_bind(Value::Array(vec![value.clone()]));
                }
            }
        }

        if let Some((field, direction)) = &query.order_by {
            builder.push(" ORDER BY data -> ");
            builder.push_bind(field.as_str());
            builder.push(match direction {
                SortDirection::Ascending => " ASC",
                SortDirection::Descending => " DESC",
            });
        }
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|row| {
                Ok(Document {
                    id: row.try_get("doc_id")?,
                    data: row.try_get("data")?,
                })
            })
            .collect()
    }
}
