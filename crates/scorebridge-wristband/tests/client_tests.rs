//! Integration tests for the upstream API client against a mock server.

use reqwest::Client;
use scorebridge_core::{AccessToken, TenantId, UserId};
use scorebridge_wristband::WristbandClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WristbandClient {
    WristbandClient::with_base_url(server.uri(), Client::new())
}

fn token() -> AccessToken {
    AccessToken::new("test-token")
}

#[tokio::test]
async fn get_user_decodes_camel_case_and_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "tenantId": "t1",
            "email": "ada@example.test",
            "givenName": "Ada",
            "emailVerified": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .get_user(&UserId::new("u1"), &token())
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.given_name.as_deref(), Some("Ada"));
    assert!(user.roles.is_empty());
}

#[tokio::test]
async fn upstream_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"code": "forbidden"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_user(&UserId::new("u1"), &token())
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn query_tenant_users_walks_pages_and_enriches_roles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tenants/t1/users"))
        .and(query_param("startIndex", "0"))
        .and(query_param("count", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "u1"}, {"id": "u2"}],
            "itemsPerPage": 2,
            "startIndex": 0,
            "totalResults": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tenants/t1/users"))
        .and(query_param("startIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "u3"}],
            "itemsPerPage": 2,
            "startIndex": 2,
            "totalResults": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/resolve-assigned-roles"))
        .and(body_json(json!({"userIds": ["u1", "u2", "u3"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"userId": "u1", "roles": [{"id": "r1", "name": "app:scorebridge:admin"}]},
                {"userId": "u3", "roles": [{"id": "r2", "name": "scorer"}]}
            ],
            "failures": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server)
        .query_tenant_users(&TenantId::new("t1"), true, &token())
        .await
        .unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].roles, vec!["admin"]);
    assert!(users[1].roles.is_empty());
    assert_eq!(users[2].roles, vec!["scorer"]);
}

#[tokio::test]
async fn query_tenant_users_without_roles_skips_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tenants/t1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "u1"}],
            "itemsPerPage": 50,
            "startIndex": 0,
            "totalResults": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/resolve-assigned-roles"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let users = client_for(&server)
        .query_tenant_users(&TenantId::new("t1"), false, &token())
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn page_failure_aborts_the_aggregate_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tenants/t1/users"))
        .and(query_param("startIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "u1"}],
            "itemsPerPage": 1,
            "startIndex": 0,
            "totalResults": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tenants/t1/users"))
        .and(query_param("startIndex", "1"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .query_tenant_users(&TenantId::new("t1"), false, &token())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn invitation_requests_use_one_based_start_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tenants/t1/new-user-invitation-requests"))
        .and(query_param("startIndex", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "inv1", "email": "a@b.test", "status": "PENDING_INVITE_ACCEPTANCE"},
                {"id": "inv2", "email": "c@d.test", "status": "CANCELLED"}
            ],
            "itemsPerPage": 50,
            "startIndex": 1,
            "totalResults": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invitations = client_for(&server)
        .query_invitation_requests(&TenantId::new("t1"), &token())
        .await
        .unwrap();

    assert_eq!(invitations.len(), 2);
    assert!(invitations[0].is_pending());
    assert!(!invitations[1].is_pending());
}

#[tokio::test]
async fn cancel_invitation_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/new-user-invitation/cancel-invite"))
        .and(body_json(json!({"newUserInvitationRequestId": "inv1"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .cancel_invitation("inv1", &token())
        .await
        .unwrap();
}

#[tokio::test]
async fn change_password_forwards_upstream_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/change-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "invalid_password"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .change_password(&UserId::new("u1"), "old", "new", &token())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn idp_upsert_enables_override_toggle_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity-provider-override-toggles"))
        .and(query_param("upsert", "true"))
        .and(body_json(json!({
            "ownerType": "TENANT",
            "ownerId": "t1",
            "status": "ENABLED"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/identity-providers"))
        .and(query_param("upsert", "true"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let idp = scorebridge_wristband::models::IdentityProviderUpsert::okta_oidc(
        "acme.okta.example",
        "cid",
        Some("secret".into()),
        true,
    );
    client_for(&server)
        .upsert_identity_provider(&TenantId::new("t1"), &idp, &token())
        .await
        .unwrap();
}

#[tokio::test]
async fn idp_upsert_stops_when_toggle_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity-provider-override-toggles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/identity-providers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let idp = scorebridge_wristband::models::IdentityProviderUpsert::okta_oidc(
        "acme.okta.example",
        "cid",
        None,
        true,
    );
    let err = client_for(&server)
        .upsert_identity_provider(&TenantId::new("t1"), &idp, &token())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn update_user_roles_replaces_assignment_set() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/u1/roles"))
        .and(body_json(json!({"roleIds": ["r1", "r2"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update_user_roles(
            &UserId::new("u1"),
            &["r1".to_string(), "r2".to_string()],
            &token(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn get_user_info_uses_singleton_role_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/resolve-assigned-roles"))
        .and(body_json(json!({"userIds": ["u1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"userId": "u1", "roles": [{"id": "r1", "name": "app:admin"}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .get_user_info(&UserId::new("u1"), true, &token())
        .await
        .unwrap();
    assert_eq!(user.roles, vec!["admin"]);
}

#[tokio::test]
async fn empty_success_body_reads_as_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/resolve-assigned-roles"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let assignments = client_for(&server)
        .resolve_assigned_roles(&["u1".to_string()], &token())
        .await
        .unwrap();
    assert!(assignments.items.is_empty());
    assert!(assignments.failures.is_empty());
}

#[tokio::test]
async fn fetch_tenant_options_unwraps_item_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant-discovery/fetch-tenants"))
        .and(body_json(json!({
            "applicationId": "app1",
            "email": "ada@example.test"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "tenantId": "t1",
                "tenantDomainName": "acme",
                "tenantDisplayName": "Acme",
                "tenantLoginUrl": "https://acme.login.example"
            }]
        })))
        .mount(&server)
        .await;

    let options = client_for(&server)
        .fetch_tenant_options("app1", "ada@example.test", &token())
        .await
        .unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].tenant_display_name.as_deref(), Some("Acme"));
}
