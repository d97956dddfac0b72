//! In-memory `DocumentStore` backend.
//!
//! Used by service-level tests and local development without a
//! database. Implements exactly the same query semantics as the
//! Postgres backend.

use crate::error::{DocStoreError, DocStoreResult};
use crate::query::{Filter, Query, SortDirection};
use crate::store::{Document, DocumentStore};
use async_trait::async_trait;
use scorebridge_core::TenantId;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// In-memory document store keyed by tenant, then collection, then
/// document id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tenants: RwLock<HashMap<String, Collections>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<Option<Value>> {
        let tenants = self.tenants.read().await;
        Ok(tenants
            .get(tenant_id.as_str())
            .and_then(|c| c.get(collection))
            .and_then(|docs| docs.get(doc_id))
            .cloned())
    }

    async fn set(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        data: &Value,
    ) -> DocStoreResult<()> {
        let mut tenants = self.tenants.write().await;
        tenants
            .entry(tenant_id.as_str().to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .insert(doc_id.to_string(), data.clone());
        Ok(())
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
        patch: &Map<String, Value>,
    ) -> DocStoreResult<()> {
        let mut tenants = self.tenants.write().await;
        let existing = tenants
            .get_mut(tenant_id.as_str())
            .and_then(|c| c.get_mut(collection))
            .and_then(|docs| docs.get_mut(doc_id))
            .ok_or_else(|| DocStoreError::not_found(collection, doc_id))?;

        let Some(object) = existing.as_object_mut() else {
            return Err(DocStoreError::not_an_object(collection, doc_id));
        };
        for (key, value) in patch {
            object.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool> {
        let mut tenants = self.tenants.write().await;
        let removed = tenants
            .get_mut(tenant_id.as_str())
            .and_then(|c| c.get_mut(collection))
            .and_then(|docs| docs.remove(doc_id));
        Ok(removed.is_some())
    }

    async fn exists(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        doc_id: &str,
    ) -> DocStoreResult<bool> {
        Ok(self.get(tenant_id, collection, doc_id).await?.is_some())
    }

    async fn query(
        &self,
        tenant_id: &TenantId,
        collection: &str,
        query: &Query,
    ) -> DocStoreResult<Vec<Document>> {
        let tenants = self.tenants.read().await;
        let mut results: Vec<Document> = tenants
            .get(tenant_id.as_str())
            .and_then(|c| c.get(collection))
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| query.filters.iter().all(|f| matches(f, data)))
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            results.sort_by(|a, b| {
                let ord = compare_values(a.data.get(field), b.data.get(field));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            results.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(results)
    }
}

fn matches(filter: &Filter, data: &Value) -> bool {
    match filter {
        Filter::Eq { field, value } => data.get(field) == Some(value),
        Filter::ArrayContains { field, value } => data
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|items| items.contains(value)),
    }
}

/// Total order over JSON values for sorting: missing < null < bool <
/// number < string, with arrays and objects last by their text form.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (x, y) if rank(x) != rank(y) => rank(x).cmp(&rank(y)),
        (x, y) => format!("{x:?}").cmp(&format!("{y:?}")),
    }
}
