//! Tenant-scoped encrypted secrets.
//!
//! When no encryption key is configured, every route answers 503 via
//! [`crate::error::ApiError::SecretsUnavailable`].

use crate::error::ApiResult;
use crate::models::SecretRequest;
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use scorebridge_secrets::Secret;

/// GET /api/secrets
pub async fn list_secrets(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<Secret>>> {
    let secrets = state.secrets.list(&session.tenant_id).await?;
    Ok(Json(secrets))
}

/// POST /api/secrets
///
/// Upsert by name: 201 when a new secret was created, 200 when an
/// existing one was overwritten.
pub async fn upsert_secret(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<SecretRequest>,
) -> ApiResult<impl IntoResponse> {
    let secret = Secret {
        name: request.name,
        display_name: request.display_name,
        environment_id: request.environment_id,
        token: request.token,
    };
    let created = state.secrets.upsert(&session.tenant_id, &secret).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(secret)))
}

/// GET /api/secrets/:name
pub async fn get_secret(
    State(state): State<AppState>,
    Session(session): Session,
    Path(name): Path<String>,
) -> ApiResult<Json<Secret>> {
    let secret = state.secrets.get(&session.tenant_id, &name).await?;
    Ok(Json(secret))
}

/// GET /api/secrets/:name/exists
pub async fn secret_exists(
    State(state): State<AppState>,
    Session(session): Session,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let exists = state.secrets.exists(&session.tenant_id, &name).await?;
    Ok(Json(serde_json::json!({ "exists": exists })))
}

/// DELETE /api/secrets/:name
pub async fn delete_secret(
    State(state): State<AppState>,
    Session(session): Session,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.secrets.delete(&session.tenant_id, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
