use serde::{Deserialize, Serialize};

use super::{is_blank, EntityMetadata};

/// An upstream user record.
///
/// `roles` is a local enrichment: it is populated from the batched role
/// resolution endpoint and returned to our own callers, but it is never
/// part of any payload sent back upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub tenant_id: Option<String>,
    pub application_id: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub username: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub picture_url: Option<String>,
    pub phone_number: Option<String>,
    pub birthdate: Option<String>,
    pub status: Option<String>,
    /// Free-form metadata maps owned by the upstream.
    pub public_metadata: Option<serde_json::Value>,
    pub restricted_metadata: Option<serde_json::Value>,
    /// Lifecycle timestamps and version token.
    pub metadata: Option<EntityMetadata>,
    /// Role SKUs resolved locally. Empty for users with no assignments.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Partial profile update. Unset and blank fields are omitted from the
/// PATCH body so they keep their upstream values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "is_blank")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub picture_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "u1",
                "tenantId": "t1",
                "email": "a@b.example",
                "givenName": "Ada",
                "familyName": "Lovelace",
                "emailVerified": true
            }"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.tenant_id.as_deref(), Some("t1"));
        assert_eq!(user.given_name.as_deref(), Some("Ada"));
        assert_eq!(user.email_verified, Some(true));
        assert!(user.roles.is_empty());
    }

    #[test]
    fn carries_entity_metadata() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "u1",
                "metadata": {
                    "creationTime": "2024-01-01T00:00:00Z",
                    "lastModifiedTime": "2024-06-01T00:00:00Z",
                    "version": "7"
                }
            }"#,
        )
        .unwrap();
        let metadata = user.metadata.unwrap();
        assert_eq!(metadata.version.as_deref(), Some("7"));
        assert_eq!(
            metadata.creation_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn update_omits_unset_and_blank_fields() {
        let update = UserUpdate {
            given_name: Some("Ada".into()),
            family_name: Some("".into()),
            nickname: Some("   ".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "givenName": "Ada" }));
    }
}
