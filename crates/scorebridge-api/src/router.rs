//! Route table for the gateway API.

use crate::handlers::{games, idp, roles, secrets, tenant, user, users};
use crate::session::require_session;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

/// Builds the full router: the session-guarded `/api` surface plus an
/// unauthenticated health probe.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/user",
            get(user::get_current_user)
                .patch(user::update_profile)
                .delete(user::delete_self),
        )
        .route("/user/nickname", put(user::update_nickname))
        .route("/user/change-password", post(user::change_password))
        .route("/user/deactivate", post(user::deactivate_self))
        .route("/users", get(users::list_users))
        .route("/users/invite", post(users::invite_user))
        .route("/users/invitations", get(users::list_pending_invitations))
        .route(
            "/users/invitations/:id/cancel",
            post(users::cancel_invitation),
        )
        .route("/users/:id/roles", put(users::update_user_roles))
        .route(
            "/users/:id/assignable-roles",
            get(users::list_assignable_roles),
        )
        .route("/users/:id/deactivate", post(users::deactivate_user))
        .route("/users/:id", delete(users::delete_user))
        .route("/tenant", get(tenant::get_tenant).patch(tenant::update_tenant))
        .route("/tenant/options", get(tenant::tenant_options))
        .route("/roles", get(roles::list_roles))
        .route("/idp", get(idp::list_identity_providers))
        .route("/idp/google-saml", put(idp::upsert_google_saml))
        .route("/idp/okta", put(idp::upsert_okta))
        .route("/idp/redirect-urls", get(idp::redirect_urls))
        .route(
            "/secrets",
            get(secrets::list_secrets).post(secrets::upsert_secret),
        )
        .route(
            "/secrets/:name",
            get(secrets::get_secret).delete(secrets::delete_secret),
        )
        .route("/secrets/:name/exists", get(secrets::secret_exists))
        .route("/games", post(games::create_game).get(games::list_games))
        .route(
            "/games/:id",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        .route("/games/:id/rounds", post(games::add_round))
        .route(
            "/games/:id/rounds/:round_id",
            put(games::edit_round).delete(games::delete_round),
        )
        .route("/games/:id/complete", put(games::complete_game))
        .route("/games/:id/totals", get(games::game_totals))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionSealer, SESSION_COOKIE};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use scorebridge_core::{AccessToken, SessionContext, TenantId, UserId};
    use scorebridge_docstore::MemoryStore;
    use scorebridge_secrets::{EncryptionService, SecretStore};
    use scorebridge_wristband::WristbandClient;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let documents = Arc::new(MemoryStore::new());
        let encryption = Arc::new(EncryptionService::from_master_secret("router-test"));
        AppState {
            wristband: Arc::new(WristbandClient::with_base_url(
                "http://127.0.0.1:0".to_string(),
                reqwest::Client::new(),
            )),
            documents: documents.clone(),
            secrets: SecretStore::new(documents, Some(encryption)),
            sealer: Arc::new(SessionSealer::new(EncryptionService::from_master_secret(
                "router-test-session",
            ))),
            application_id: "app1".to_string(),
        }
    }

    fn sealed_cookie(state: &AppState) -> String {
        let context = SessionContext {
            tenant_id: TenantId::new("t1"),
            user_id: UserId::new("u1"),
            access_token: AccessToken::new("tok"),
            expires_at: Utc::now() + Duration::hours(1),
        };
        let value = state.sealer.seal(&context).unwrap();
        format!("{SESSION_COOKIE}={value}")
    }

    #[tokio::test]
    async fn health_needs_no_session() {
        let app = api_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_without_session_is_unauthorized() {
        let app = api_router(test_state());
        let response = app
            .oneshot(Request::get("/api/games").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn api_with_garbage_cookie_is_unauthorized() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/games")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}=garbage"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sealed_session_reaches_the_handler() {
        let state = test_state();
        let cookie = sealed_cookie(&state);
        let app = api_router(state);

        let response = app
            .oneshot(
                Request::get("/api/games")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn games_crud_through_the_http_surface() {
        let state = test_state();
        let cookie = sealed_cookie(&state);
        let app = api_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/games")
                    .header(header::COOKIE, cookie.clone())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name": "Friday", "players": ["Alice", "Bob"]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let game: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let game_id = game["id"].as_str().unwrap().to_string();
        assert_eq!(game["targetScore"], 500);

        let response = app
            .oneshot(
                Request::delete(&format!("/api/games/{game_id}"))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply["message"], "Game deleted successfully");
    }
}
