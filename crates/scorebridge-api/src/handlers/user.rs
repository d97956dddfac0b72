//! The current user's own profile.
//!
//! Every route here acts on the user bound to the session; there is no
//! way to address a different user through this surface.

use crate::error::ApiResult;
use crate::models::{
    ChangePasswordRequest, CurrentUserQuery, NicknameRequest, UpdateProfileRequest,
};
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use scorebridge_wristband::models::{User, UserUpdate};

/// GET /api/user
pub async fn get_current_user(
    State(state): State<AppState>,
    Session(session): Session,
    Query(query): Query<CurrentUserQuery>,
) -> ApiResult<Json<User>> {
    let user = state
        .wristband
        .get_user_info(&session.user_id, query.include_roles, &session.access_token)
        .await?;
    Ok(Json(user))
}

/// PATCH /api/user
pub async fn update_profile(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let update = UserUpdate {
        given_name: request.given_name,
        family_name: request.family_name,
        nickname: request.nickname,
        phone_number: request.phone_number,
        birthdate: request.birthdate,
        picture_url: request.picture_url,
    };
    let user = state
        .wristband
        .update_user(&session.user_id, &update, &session.access_token)
        .await?;
    Ok(Json(user))
}

/// PUT /api/user/nickname
pub async fn update_nickname(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<NicknameRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .wristband
        .update_nickname(&session.user_id, &request.nickname, &session.access_token)
        .await?;
    Ok(Json(user))
}

/// POST /api/user/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    request.validate()?;
    state
        .wristband
        .change_password(
            &session.user_id,
            &request.current_password,
            &request.new_password,
            &session.access_token,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/user/deactivate
pub async fn deactivate_self(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<StatusCode> {
    state
        .wristband
        .deactivate_user(&session.user_id, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/user
pub async fn delete_self(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<StatusCode> {
    state
        .wristband
        .delete_user(&session.user_id, &session.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
