//! Tenant role definitions.

use crate::error::ApiResult;
use crate::models::RoleInfo;
use crate::session::Session;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<RoleInfo>>> {
    let roles = state
        .wristband
        .query_tenant_roles(&session.tenant_id, &session.access_token)
        .await?;
    Ok(Json(roles.into_iter().map(RoleInfo::from).collect()))
}
