//! Wire models for the upstream API.
//!
//! Field names follow the upstream's camelCase JSON via serde renaming.
//! Response models are liberal in what they accept (`Option` and
//! `#[serde(default)]` on fields the upstream omits in some contexts);
//! request models skip unset fields so partial updates stay partial.

pub mod discovery;
pub mod idp;
pub mod invite;
pub mod role;
pub mod tenant;
pub mod user;

pub use discovery::TenantOption;
pub use idp::{
    IdentityProvider, IdentityProviderUpsert, IdpRedirectUrlConfig, OidcConfig, Saml2Config,
};
pub use invite::NewUserInvitationRequest;
pub use role::{Role, RoleAssignments, RoleResolutionFailure, UserRoles};
pub use tenant::{Tenant, TenantUpdate};
pub use user::{User, UserUpdate};

/// Entity lifecycle metadata carried by several upstream records. The
/// version string is the upstream's optimistic-concurrency token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub activation_time: Option<String>,
    pub creation_time: Option<String>,
    pub deactivation_time: Option<String>,
    pub last_modified_time: Option<String>,
    pub version: Option<String>,
}

/// Generic `{"items": [...]}` list envelope used by several non-paginated
/// upstream endpoints.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Serde helper: skip request fields that are unset or blank, so a PATCH
/// never overwrites upstream data with empty strings.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(s) => s.trim().is_empty(),
    }
}
