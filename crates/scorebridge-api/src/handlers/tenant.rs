//! The session's tenant.

use crate::error::ApiResult;
use crate::models::{TenantOptionsQuery, UpdateTenantRequest};
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use scorebridge_wristband::models::{Tenant, TenantOption, TenantUpdate};

/// GET /api/tenant
pub async fn get_tenant(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Tenant>> {
    let tenant = state
        .wristband
        .get_tenant(&session.tenant_id, &session.access_token)
        .await?;
    Ok(Json(tenant))
}

/// PATCH /api/tenant
pub async fn update_tenant(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<UpdateTenantRequest>,
) -> ApiResult<Json<Tenant>> {
    request.validate()?;
    let update = TenantUpdate {
        display_name: request.display_name,
        logo_url: request.logo_url,
        description: request.description,
    };
    let tenant = state
        .wristband
        .update_tenant(&session.tenant_id, &update, &session.access_token)
        .await?;
    Ok(Json(tenant))
}

/// GET /api/tenant/options?email=...
///
/// Tenant discovery: which tenants of this application can the given
/// email sign in to. Used for the tenant switcher.
pub async fn tenant_options(
    State(state): State<AppState>,
    Session(session): Session,
    Query(query): Query<TenantOptionsQuery>,
) -> ApiResult<Json<Vec<TenantOption>>> {
    let options = state
        .wristband
        .fetch_tenant_options(&state.application_id, &query.email, &session.access_token)
        .await?;
    Ok(Json(options))
}
