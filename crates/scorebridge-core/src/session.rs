//! The per-request authenticated session context.
//!
//! The OAuth callback flow (handled outside this workspace's core) resolves
//! an inbound request to a `(tenant, user, access token)` triple. Everything
//! downstream — upstream API calls, document-store paths — derives its
//! scoping from this context and never from request parameters.

use crate::ids::{TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer access token for the upstream API.
///
/// Wrapped so the token never leaks through `Debug` output or log fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Exposes the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// The resolved identity of an authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Tenant the caller belongs to.
    pub tenant_id: TenantId,
    /// The caller's upstream user id.
    pub user_id: UserId,
    /// Bearer token forwarded verbatim to the upstream API.
    pub access_token: AccessToken,
    /// When the session (and the token within it) expires.
    pub expires_at: DateTime<Utc>,
}

impl SessionContext {
    /// Whether the session has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn context(expires_in: Duration) -> SessionContext {
        SessionContext {
            tenant_id: TenantId::new("t1"),
            user_id: UserId::new("u1"),
            access_token: AccessToken::new("tok_secret"),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[test]
    fn debug_redacts_token() {
        let ctx = context(Duration::hours(1));
        let debug = format!("{ctx:?}");
        assert!(!debug.contains("tok_secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn expiry_check() {
        assert!(!context(Duration::hours(1)).is_expired());
        assert!(context(Duration::hours(-1)).is_expired());
    }

    #[test]
    fn serde_round_trip() {
        let ctx = context(Duration::hours(1));
        let json = serde_json::to_string(&ctx).unwrap();
        let back: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tenant_id, ctx.tenant_id);
        assert_eq!(back.user_id, ctx.user_id);
        assert_eq!(back.access_token, ctx.access_token);
    }
}
