//! Tenant single sign-on configuration.

use crate::error::ApiResult;
use crate::models::{GoogleSamlRequest, OktaRequest};
use crate::session::Session;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use scorebridge_wristband::models::{
    IdentityProvider, IdentityProviderUpsert, IdpRedirectUrlConfig,
};

/// GET /api/idp
pub async fn list_identity_providers(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<IdentityProvider>>> {
    let providers = state
        .wristband
        .list_identity_providers(&session.tenant_id, &session.access_token)
        .await?;
    Ok(Json(providers))
}

/// PUT /api/idp/google-saml
pub async fn upsert_google_saml(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<GoogleSamlRequest>,
) -> ApiResult<StatusCode> {
    request.validate()?;
    let upsert = IdentityProviderUpsert::google_saml(
        &request.idp_entity_id,
        &request.idp_sso_url,
        &request.signing_certificates,
        request.enabled,
    );
    state
        .wristband
        .upsert_identity_provider(&session.tenant_id, &upsert, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/idp/okta
pub async fn upsert_okta(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<OktaRequest>,
) -> ApiResult<StatusCode> {
    request.validate()?;
    let upsert = IdentityProviderUpsert::okta_oidc(
        &request.domain,
        &request.client_id,
        request.client_secret,
        request.enabled,
    );
    state
        .wristband
        .upsert_identity_provider(&session.tenant_id, &upsert, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/idp/redirect-urls
///
/// The ACS / redirect URLs a tenant admin must register at their
/// external provider.
pub async fn redirect_urls(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<IdpRedirectUrlConfig>>> {
    let configs = state
        .wristband
        .resolve_redirect_urls(&session.tenant_id, &session.access_token)
        .await?;
    Ok(Json(configs))
}
