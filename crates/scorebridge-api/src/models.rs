//! Request and response bodies for the `/api` surface.
//!
//! Wire casing is camelCase to match what the frontend and the
//! upstream both speak.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Query flags for the current-user read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserQuery {
    #[serde(default = "default_enabled")]
    pub include_roles: bool,
}

impl Default for CurrentUserQuery {
    fn default() -> Self {
        Self {
            include_roles: true,
        }
    }
}

/// Partial profile update for the current user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub nickname: Option<String>,
    pub phone_number: Option<String>,
    pub birthdate: Option<String>,
    pub picture_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameRequest {
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.current_password.is_empty() || self.new_password.is_empty() {
            return Err(ApiError::Validation(
                "Both current and new password are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Desired role SKUs for a user; replaces the current assignment set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesRequest {
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteUserRequest {
    pub email: String,
    /// Role SKUs to assign on acceptance.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl InviteUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    pub display_name: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
}

impl UpdateTenantRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.display_name {
            if name.chars().count() > 60 {
                return Err(ApiError::Validation(
                    "Display name must be at most 60 characters".to_string(),
                ));
            }
        }
        if let Some(url) = &self.logo_url {
            if url.len() > 2000 {
                return Err(ApiError::Validation(
                    "Logo URL must be at most 2000 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantOptionsQuery {
    pub email: String,
}

/// Role with its derived SKU, the form the frontend works with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub display_name: Option<String>,
}

impl From<scorebridge_wristband::models::Role> for RoleInfo {
    fn from(role: scorebridge_wristband::models::Role) -> Self {
        let sku = role.sku().to_string();
        Self {
            id: role.id,
            name: role.name,
            sku,
            display_name: role.display_name,
        }
    }
}

/// Google Workspace SAML configuration submitted by a tenant admin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSamlRequest {
    pub idp_entity_id: String,
    pub idp_sso_url: String,
    pub signing_certificates: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl GoogleSamlRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.idp_entity_id.trim().is_empty() || self.idp_sso_url.trim().is_empty() {
            return Err(ApiError::Validation(
                "Entity ID and SSO URL are required".to_string(),
            ));
        }
        if self.signing_certificates.iter().all(|c| c.trim().is_empty()) {
            return Err(ApiError::Validation(
                "At least one signing certificate is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Okta OIDC configuration submitted by a tenant admin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OktaRequest {
    pub domain: String,
    pub client_id: String,
    /// Absent means keep the secret already stored upstream.
    pub client_secret: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl OktaRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.domain.trim().is_empty() || self.client_id.trim().is_empty() {
            return Err(ApiError::Validation(
                "Okta domain and client ID are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Upsert body for a secret; the token travels in plaintext here and
/// only here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRequest {
    pub name: String,
    pub display_name: Option<String>,
    pub environment_id: Option<String>,
    pub token: String,
}

fn default_enabled() -> bool {
    true
}
