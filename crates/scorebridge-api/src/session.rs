//! Sealed-cookie session handling.
//!
//! The session is an opaque, authenticated ciphertext of the
//! [`SessionContext`] JSON, set as an HTTP-only cookie by the auth
//! layer fronting this service. AES-256-GCM gives both confidentiality
//! (the access token rides inside) and integrity (a tampered cookie
//! simply fails to unseal), so there is no separate signature step.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use scorebridge_core::SessionContext;
use scorebridge_secrets::EncryptionService;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sb_session";

/// Seals a `SessionContext` into a cookie value and back.
pub struct SessionSealer {
    encryption: EncryptionService,
}

impl SessionSealer {
    #[must_use]
    pub fn new(encryption: EncryptionService) -> Self {
        Self { encryption }
    }

    /// Seal a session context into an opaque cookie value.
    pub fn seal(&self, context: &SessionContext) -> Result<String, ApiError> {
        let json = serde_json::to_string(context)
            .map_err(|e| ApiError::Internal(format!("failed to serialize session: {e}")))?;
        self.encryption
            .encrypt(&json)
            .map_err(|e| ApiError::Internal(format!("failed to seal session: {e}")))
    }

    /// Unseal a cookie value. Returns `None` for anything that is not a
    /// currently valid session: tampered or garbage ciphertext, wrong
    /// key, or an expired context. Callers cannot distinguish the
    /// cases, which is deliberate.
    #[must_use]
    pub fn unseal(&self, cookie_value: &str) -> Option<SessionContext> {
        let json = self.encryption.decrypt(cookie_value).ok()?;
        let context: SessionContext = serde_json::from_str(&json).ok()?;
        if context.is_expired() {
            return None;
        }
        Some(context)
    }
}

/// Middleware: require a valid session cookie on every request.
///
/// On success the resolved `SessionContext` is attached as a request
/// extension for the [`Session`] extractor.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Missing session".to_string()))?;

    let context = state
        .sealer
        .unseal(cookie.value())
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Extractor for the authenticated session context.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(Session)
            .ok_or_else(|| ApiError::Unauthorized("Missing session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use scorebridge_core::{AccessToken, TenantId, UserId};

    fn sealer() -> SessionSealer {
        SessionSealer::new(EncryptionService::from_master_secret("session-test"))
    }

    fn context(expires_in: Duration) -> SessionContext {
        SessionContext {
            tenant_id: TenantId::new("t1"),
            user_id: UserId::new("u1"),
            access_token: AccessToken::new("tok"),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[test]
    fn seal_unseal_round_trip() {
        let sealer = sealer();
        let sealed = sealer.seal(&context(Duration::hours(1))).unwrap();
        let unsealed = sealer.unseal(&sealed).expect("valid session");
        assert_eq!(unsealed.tenant_id, TenantId::new("t1"));
        assert_eq!(unsealed.user_id, UserId::new("u1"));
    }

    #[test]
    fn cookie_value_hides_the_token() {
        let sealed = sealer().seal(&context(Duration::hours(1))).unwrap();
        assert!(!sealed.contains("tok"));
        assert!(!sealed.contains("u1"));
    }

    #[test]
    fn tampered_cookie_fails_closed() {
        let sealer = sealer();
        let mut sealed = sealer.seal(&context(Duration::hours(1))).unwrap();
        sealed.pop();
        sealed.push('A');
        assert!(sealer.unseal(&sealed).is_none());
        assert!(sealer.unseal("garbage").is_none());
    }

    #[test]
    fn expired_session_is_rejected() {
        let sealer = sealer();
        let sealed = sealer.seal(&context(Duration::hours(-1))).unwrap();
        assert!(sealer.unseal(&sealed).is_none());
    }

    #[test]
    fn different_key_cannot_unseal() {
        let sealed = sealer().seal(&context(Duration::hours(1))).unwrap();
        let other = SessionSealer::new(EncryptionService::from_master_secret("other"));
        assert!(other.unseal(&sealed).is_none());
    }
}
