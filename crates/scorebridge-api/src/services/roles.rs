//! Role SKU to upstream role id mapping.

use scorebridge_wristband::models::Role;
use std::collections::HashMap;

/// Translates caller-supplied role SKUs into upstream role ids using
/// the tenant's role definitions.
///
/// Unknown SKUs are dropped with a warning rather than failing the
/// whole request; the caller's remaining roles still apply.
pub fn skus_to_role_ids(tenant_roles: &[Role], skus: &[String]) -> Vec<String> {
    let ids_by_sku: HashMap<&str, &str> = tenant_roles
        .iter()
        .map(|role| (role.sku(), role.id.as_str()))
        .collect();

    skus.iter()
        .filter_map(|sku| match ids_by_sku.get(sku.as_str()) {
            Some(id) => Some((*id).to_string()),
            None => {
                tracing::warn!(sku = %sku, "ignoring unknown role SKU");
                None
            }
        })
        .collect()
}
