//! Tenant user administration.
//!
//! All operations are scoped to the session's tenant. Whether the
//! caller may actually administer other users is decided upstream via
//! the forwarded bearer token; a caller without the right role gets the
//! upstream's 403 mapped through.

use crate::error::ApiResult;
use crate::models::{InviteUserRequest, RoleInfo, UpdateRolesRequest};
use crate::services::roles::skus_to_role_ids;
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use scorebridge_core::UserId;
use scorebridge_wristband::models::{NewUserInvitationRequest, User};

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .wristband
        .query_tenant_users(&session.tenant_id, true, &session.access_token)
        .await?;
    Ok(Json(users))
}

/// POST /api/users/invite
pub async fn invite_user(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<InviteUserRequest>,
) -> ApiResult<StatusCode> {
    request.validate()?;

    let tenant_roles = state
        .wristband
        .query_tenant_roles(&session.tenant_id, &session.access_token)
        .await?;
    let role_ids = skus_to_role_ids(&tenant_roles, &request.roles);

    state
        .wristband
        .invite_user(
            &session.tenant_id,
            request.email.trim(),
            &role_ids,
            &session.access_token,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/invitations
///
/// Only invitations still awaiting action are returned; accepted,
/// cancelled and expired ones are filtered out.
pub async fn list_pending_invitations(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<NewUserInvitationRequest>>> {
    let invitations = state
        .wristband
        .query_invitation_requests(&session.tenant_id, &session.access_token)
        .await?;
    let pending = invitations.into_iter().filter(|i| i.is_pending()).collect();
    Ok(Json(pending))
}

/// POST /api/users/invitations/:id/cancel
pub async fn cancel_invitation(
    State(state): State<AppState>,
    Session(session): Session,
    Path(invitation_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .wristband
        .cancel_invitation(&invitation_id, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/:id/roles
///
/// Replaces the user's assignments with the given SKU set.
pub async fn update_user_roles(
    State(state): State<AppState>,
    Session(session): Session,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateRolesRequest>,
) -> ApiResult<StatusCode> {
    let tenant_roles = state
        .wristband
        .query_tenant_roles(&session.tenant_id, &session.access_token)
        .await?;
    let role_ids = skus_to_role_ids(&tenant_roles, &request.roles);

    state
        .wristband
        .update_user_roles(&UserId::new(user_id), &role_ids, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/:id/assignable-roles
pub async fn list_assignable_roles(
    State(state): State<AppState>,
    Session(session): Session,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<RoleInfo>>> {
    let roles = state
        .wristband
        .resolve_assignable_roles(&UserId::new(user_id), &session.access_token)
        .await?;
    Ok(Json(roles.into_iter().map(RoleInfo::from).collect()))
}

/// POST /api/users/:id/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Session(session): Session,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .wristband
        .deactivate_user(&UserId::new(user_id), &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Session(session): Session,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .wristband
        .delete_user(&UserId::new(user_id), &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
