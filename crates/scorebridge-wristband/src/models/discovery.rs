use serde::{Deserialize, Serialize};

/// One tenant a given email address can sign in to, as returned by the
/// tenant discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantOption {
    pub tenant_id: Option<String>,
    pub tenant_domain_name: Option<String>,
    pub tenant_display_name: Option<String>,
    pub tenant_login_url: Option<String>,
}
