use serde::{Deserialize, Serialize};

/// An upstream role definition.
///
/// Role names are namespaced, e.g. `app:myapp:admin`. The final segment
/// is the SKU our callers work with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub owner_type: Option<String>,
    pub owner_id: Option<String>,
    pub tenant_visibility: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl Role {
    /// The short role SKU: the substring after the last `:` in the role
    /// name, or the whole name when it contains no colon.
    #[must_use]
    pub fn sku(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}

/// One user's resolved role assignments in a batched resolution response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoles {
    pub user_id: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Per-item failure in a batched resolution response. Failures are
/// reported per entry rather than failing the whole batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResolutionFailure {
    pub code: Option<String>,
    pub message: Option<String>,
    pub index: Option<i64>,
    pub user_id: Option<String>,
}

/// Response of the batched `resolve-assigned-roles` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignments {
    #[serde(default)]
    pub items: Vec<UserRoles>,
    #[serde(default)]
    pub failures: Vec<RoleResolutionFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> Role {
        Role {
            id: "r1".into(),
            name: name.into(),
            display_name: None,
            description: None,
            owner_type: None,
            owner_id: None,
            tenant_visibility: None,
            metadata: None,
        }
    }

    #[test]
    fn sku_is_last_colon_segment() {
        assert_eq!(role("app:myapp:admin").sku(), "admin");
        assert_eq!(role("owner").sku(), "owner");
        assert_eq!(role("a:b").sku(), "b");
    }

    #[test]
    fn assignments_tolerate_missing_failures() {
        let parsed: RoleAssignments = serde_json::from_str(
            r#"{"items": [{"userId": "u1", "roles": [{"id": "r1", "name": "app:admin"}]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].user_id, "u1");
        assert!(parsed.failures.is_empty());
    }

    #[test]
    fn assignments_surface_per_item_failures() {
        let parsed: RoleAssignments = serde_json::from_str(
            r#"{
                "items": [],
                "failures": [
                    {"code": "notFound", "message": "no such user", "index": 0, "userId": "u1"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.failures.len(), 1);
        assert_eq!(parsed.failures[0].user_id.as_deref(), Some("u1"));
        assert_eq!(parsed.failures[0].code.as_deref(), Some("notFound"));
    }

    #[test]
    fn role_carries_ownership_fields() {
        let parsed: Role = serde_json::from_str(
            r#"{
                "id": "r1",
                "name": "app:scorebridge:admin",
                "ownerType": "APPLICATION",
                "ownerId": "app1",
                "tenantVisibility": "ALL_TENANTS",
                "metadata": {"version": "3"}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.owner_type.as_deref(), Some("APPLICATION"));
        assert_eq!(parsed.owner_id.as_deref(), Some("app1"));
        assert_eq!(parsed.tenant_visibility.as_deref(), Some("ALL_TENANTS"));
        assert_eq!(parsed.metadata.unwrap()["version"], "3");
    }
}
