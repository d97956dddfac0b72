use serde::{Deserialize, Serialize};

use super::{is_blank, EntityMetadata};

/// An upstream tenant record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub application_id: Option<String>,
    pub domain_name: Option<String>,
    pub vanity_domain: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub signup_enabled: Option<bool>,
    pub status: Option<String>,
    pub public_metadata: Option<serde_json::Value>,
    pub restricted_metadata: Option<serde_json::Value>,
    pub metadata: Option<EntityMetadata>,
}

/// Partial tenant update, PATCH semantics. Display name, logo URL and
/// description are the only fields clients may change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdate {
    #[serde(skip_serializing_if = "is_blank")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}
