//! Wristband HTTP client (reqwest-based).
//!
//! One method per upstream operation against
//! `https://{application-vanity-domain}/api/v1`. Every call forwards the
//! caller's bearer token; the gateway holds no credentials of its own and
//! performs no retries.

use crate::error::{WristbandError, WristbandResult};
use crate::models::{
    IdentityProvider, IdentityProviderUpsert, IdpRedirectUrlConfig, ItemList,
    NewUserInvitationRequest, Role, RoleAssignments, Tenant, TenantOption, TenantUpdate, User,
    UserUpdate,
};
use crate::pagination::{
    fetch_all_pages, INVITATION_START_INDEX, PAGE_SIZE, USER_START_INDEX,
};
use crate::roles;
use reqwest::{Client, StatusCode};
use scorebridge_core::{AccessToken, TenantId, UserId};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

/// Typed client for the Wristband REST API.
#[derive(Debug, Clone)]
pub struct WristbandClient {
    /// Base URL including the `/api/v1` prefix.
    base_url: String,
    /// Underlying HTTP client.
    http_client: Client,
}

impl WristbandClient {
    /// Create a client for an application vanity domain.
    pub fn new(vanity_domain: &str, timeout: Duration) -> WristbandResult<Self> {
        let vanity_domain = vanity_domain.trim().trim_end_matches('/');
        if vanity_domain.is_empty() {
            return Err(WristbandError::InvalidConfig(
                "application vanity domain must not be empty".into(),
            ));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent("scorebridge-gateway/1.0")
            .build()
            .map_err(|e| {
                WristbandError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: format!("https://{vanity_domain}/api/v1"),
            http_client,
        })
    }

    /// Create a client against an explicit base URL with a pre-built
    /// `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_base_url(base_url: String, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── User operations ───────────────────────────────────────────────

    /// Fetch a single user (GET /users/:id).
    pub async fn get_user(&self, user_id: &UserId, token: &AccessToken) -> WristbandResult<User> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.get(&url, token).await
    }

    /// Fetch a single user, optionally enriched with role SKUs.
    ///
    /// There is no per-user role endpoint upstream, so enrichment uses
    /// the batched resolution call with a singleton id list.
    pub async fn get_user_info(
        &self,
        user_id: &UserId,
        include_roles: bool,
        token: &AccessToken,
    ) -> WristbandResult<User> {
        let mut user = self.get_user(user_id, token).await?;
        if include_roles {
            let assignments = self
                .resolve_assigned_roles(std::slice::from_ref(&user.id), token)
                .await?;
            roles::enrich_users(std::slice::from_mut(&mut user), &assignments);
        }
        Ok(user)
    }

    /// Partially update a user's profile (PATCH /users/:id).
    pub async fn update_user(
        &self,
        user_id: &UserId,
        update: &UserUpdate,
        token: &AccessToken,
    ) -> WristbandResult<User> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.patch(&url, update, token).await
    }

    /// Update only a user's nickname (PATCH /users/:id).
    pub async fn update_nickname(
        &self,
        user_id: &UserId,
        nickname: &str,
        token: &AccessToken,
    ) -> WristbandResult<User> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.patch(&url, &serde_json::json!({ "nickname": nickname }), token)
            .await
    }

    /// Change a user's password (POST /change-password).
    ///
    /// The upstream verifies the current password itself; a wrong one
    /// comes back as a 4xx API error.
    pub async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &str,
        new_password: &str,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/change-password", self.base_url);
        let body = serde_json::json!({
            "userId": user_id,
            "currentPassword": current_password,
            "newPassword": new_password,
        });
        self.post_no_content(&url, &body, token).await
    }

    /// Deactivate a user by flipping its status (PATCH /users/:id).
    pub async fn deactivate_user(
        &self,
        user_id: &UserId,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.patch_no_content(&url, &serde_json::json!({ "status": "INACTIVE" }), token)
            .await
    }

    /// Permanently delete a user (DELETE /users/:id).
    pub async fn delete_user(
        &self,
        user_id: &UserId,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.delete(&url, token).await
    }

    /// Fetch every user of a tenant, walking all pages
    /// (GET /tenants/:id/users).
    ///
    /// With `include_roles`, role assignments for the whole list are
    /// resolved in one batched call and merged onto the users.
    pub async fn query_tenant_users(
        &self,
        tenant_id: &TenantId,
        include_roles: bool,
        token: &AccessToken,
    ) -> WristbandResult<Vec<User>> {
        let mut users = fetch_all_pages(USER_START_INDEX, PAGE_SIZE, move |start, count| {
            self.fetch_tenant_users_page(tenant_id, start, count, token)
        })
        .await?;

        if include_roles && !users.is_empty() {
            let user_ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();
            let assignments = self.resolve_assigned_roles(&user_ids, token).await?;
            roles::enrich_users(&mut users, &assignments);
        }

        Ok(users)
    }

    async fn fetch_tenant_users_page(
        &self,
        tenant_id: &TenantId,
        start_index: i64,
        count: i64,
        token: &AccessToken,
    ) -> WristbandResult<crate::pagination::Page<User>> {
        let url = format!(
            "{}/tenants/{}/users?startIndex={}&count={}",
            self.base_url, tenant_id, start_index, count
        );
        self.get(&url, token).await
    }

    // ── Role operations ───────────────────────────────────────────────

    /// Resolve role assignments for a batch of users in one call
    /// (POST /users/resolve-assigned-roles).
    pub async fn resolve_assigned_roles(
        &self,
        user_ids: &[String],
        token: &AccessToken,
    ) -> WristbandResult<RoleAssignments> {
        let url = format!("{}/users/resolve-assigned-roles", self.base_url);
        self.post(&url, &serde_json::json!({ "userIds": user_ids }), token)
            .await
    }

    /// List the roles the caller may assign to a given user
    /// (POST /users/:id/resolve-assignable-roles).
    pub async fn resolve_assignable_roles(
        &self,
        user_id: &UserId,
        token: &AccessToken,
    ) -> WristbandResult<Vec<Role>> {
        let url = format!(
            "{}/users/{}/resolve-assignable-roles",
            self.base_url, user_id
        );
        let list: ItemList<Role> = self
            .post(&url, &serde_json::json!({}), token)
            .await?;
        Ok(list.items)
    }

    /// Replace a user's role assignments (PUT /users/:id/roles).
    ///
    /// Full-replacement semantics: the supplied set becomes the user's
    /// assignments, anything not listed is dropped upstream.
    pub async fn update_user_roles(
        &self,
        user_id: &UserId,
        role_ids: &[String],
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/users/{}/roles", self.base_url, user_id);
        self.put_no_content(&url, &serde_json::json!({ "roleIds": role_ids }), token)
            .await
    }

    /// List a tenant's role definitions (GET /tenants/:id/roles).
    pub async fn query_tenant_roles(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<Vec<Role>> {
        let url = format!("{}/tenants/{}/roles", self.base_url, tenant_id);
        let list: ItemList<Role> = self.get(&url, token).await?;
        Ok(list.items)
    }

    // ── Invitation operations ─────────────────────────────────────────

    /// Invite a new user to a tenant
    /// (POST /new-user-invitation/invite-user).
    pub async fn invite_user(
        &self,
        tenant_id: &TenantId,
        email: &str,
        role_ids: &[String],
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/new-user-invitation/invite-user", self.base_url);
        let body = serde_json::json!({
            "tenantId": tenant_id,
            "email": email,
            "rolesToAssign": role_ids,
        });
        self.post_no_content(&url, &body, token).await
    }

    /// Fetch every new-user-invitation request of a tenant, walking all
    /// pages (GET /tenants/:id/new-user-invitation-requests).
    ///
    /// This collection is 1-indexed upstream, unlike users.
    pub async fn query_invitation_requests(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<Vec<NewUserInvitationRequest>> {
        fetch_all_pages(INVITATION_START_INDEX, PAGE_SIZE, move |start, count| {
            self.fetch_invitation_requests_page(tenant_id, start, count, token)
        })
        .await
    }

    async fn fetch_invitation_requests_page(
        &self,
        tenant_id: &TenantId,
        start_index: i64,
        count: i64,
        token: &AccessToken,
    ) -> WristbandResult<crate::pagination::Page<NewUserInvitationRequest>> {
        let url = format!(
            "{}/tenants/{}/new-user-invitation-requests?startIndex={}&count={}",
            self.base_url, tenant_id, start_index, count
        );
        self.get(&url, token).await
    }

    /// Cancel a pending invitation
    /// (POST /new-user-invitation/cancel-invite).
    pub async fn cancel_invitation(
        &self,
        invitation_request_id: &str,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!("{}/new-user-invitation/cancel-invite", self.base_url);
        let body = serde_json::json!({
            "newUserInvitationRequestId": invitation_request_id,
        });
        self.post_no_content(&url, &body, token).await
    }

    // ── Tenant operations ─────────────────────────────────────────────

    /// Fetch a tenant (GET /tenants/:id).
    pub async fn get_tenant(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<Tenant> {
        let url = format!("{}/tenants/{}", self.base_url, tenant_id);
        self.get(&url, token).await
    }

    /// Partially update a tenant (PATCH /tenants/:id).
    pub async fn update_tenant(
        &self,
        tenant_id: &TenantId,
        update: &TenantUpdate,
        token: &AccessToken,
    ) -> WristbandResult<Tenant> {
        let url = format!("{}/tenants/{}", self.base_url, tenant_id);
        self.patch(&url, update, token).await
    }

    // ── Identity provider operations ──────────────────────────────────

    /// List a tenant's configured identity providers
    /// (GET /tenants/:id/identity-providers).
    pub async fn list_identity_providers(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<Vec<IdentityProvider>> {
        let url = format!("{}/tenants/{}/identity-providers", self.base_url, tenant_id);
        let list: ItemList<IdentityProvider> = self.get(&url, token).await?;
        Ok(list.items)
    }

    /// Enable the tenant-level identity-provider override toggle
    /// (POST /identity-provider-override-toggles?upsert=true).
    pub async fn enable_idp_override(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        let url = format!(
            "{}/identity-provider-override-toggles?upsert=true",
            self.base_url
        );
        let body = serde_json::json!({
            "ownerType": "TENANT",
            "ownerId": tenant_id,
            "status": "ENABLED",
        });
        self.post_no_content(&url, &body, token).await
    }

    /// Create or update a tenant identity provider
    /// (POST /identity-providers?upsert=true).
    ///
    /// The override toggle is enabled first so the tenant-level provider
    /// takes effect. The two calls run sequentially without compensation:
    /// if the upsert fails after the toggle succeeded, the toggle stays
    /// enabled.
    pub async fn upsert_identity_provider(
        &self,
        tenant_id: &TenantId,
        idp: &IdentityProviderUpsert,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        self.enable_idp_override(tenant_id, token).await?;

        let mut payload = idp.clone();
        payload.tenant_id = Some(tenant_id.to_string());
        let url = format!("{}/identity-providers?upsert=true", self.base_url);
        self.post_no_content(&url, &payload, token).await
    }

    /// Resolve the redirect URLs callers must register at each external
    /// identity provider
    /// (POST /tenants/:id/identity-providers/resolve-redirect-urls).
    pub async fn resolve_redirect_urls(
        &self,
        tenant_id: &TenantId,
        token: &AccessToken,
    ) -> WristbandResult<Vec<IdpRedirectUrlConfig>> {
        let url = format!(
            "{}/tenants/{}/identity-providers/resolve-redirect-urls",
            self.base_url, tenant_id
        );
        let list: ItemList<IdpRedirectUrlConfig> =
            self.post(&url, &serde_json::json!({}), token).await?;
        Ok(list.items)
    }

    // ── Tenant discovery ──────────────────────────────────────────────

    /// List the tenants an email address can sign in to
    /// (POST /tenant-discovery/fetch-tenants).
    pub async fn fetch_tenant_options(
        &self,
        application_id: &str,
        email: &str,
        token: &AccessToken,
    ) -> WristbandResult<Vec<TenantOption>> {
        let url = format!("{}/tenant-discovery/fetch-tenants", self.base_url);
        let body = serde_json::json!({
            "applicationId": application_id,
            "email": email,
        });
        let list: ItemList<TenantOption> = self.post(&url, &body, token).await?;
        Ok(list.items)
    }

    // ── Internal HTTP methods ─────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, token: &AccessToken) -> WristbandResult<T> {
        debug!("wristband GET {}", url);
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &AccessToken,
    ) -> WristbandResult<T> {
        debug!("wristband POST {}", url);
        let response = self
            .http_client
            .post(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &AccessToken,
    ) -> WristbandResult<T> {
        debug!("wristband PATCH {}", url);
        let response = self
            .http_client
            .patch(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// POST where only the status matters. Accepts any 2xx; the upstream
    /// is inconsistent about 200 vs 201 vs 204 across these endpoints.
    async fn post_no_content<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        debug!("wristband POST {}", url);
        let response = self
            .http_client
            .post(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        self.expect_success(response).await
    }

    async fn put_no_content<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        debug!("wristband PUT {}", url);
        let response = self
            .http_client
            .put(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        self.expect_success(response).await
    }

    async fn patch_no_content<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &AccessToken,
    ) -> WristbandResult<()> {
        debug!("wristband PATCH {}", url);
        let response = self
            .http_client
            .patch(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        self.expect_success(response).await
    }

    async fn delete(&self, url: &str, token: &AccessToken) -> WristbandResult<()> {
        debug!("wristband DELETE {}", url);
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        self.expect_success(response).await
    }

    // ── Response handling ─────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> WristbandResult<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            // Some upstream endpoints answer 200 with no body at all.
            let body = if body.trim().is_empty() { "{}" } else { &body };
            serde_json::from_str(body).map_err(|e| {
                WristbandError::Decode(format!("failed to parse upstream response: {e}"))
            })
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn expect_success(&self, response: reqwest::Response) -> WristbandResult<()> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    /// Builds an API error carrying the upstream body verbatim so callers
    /// can forward it.
    async fn api_error(status: StatusCode, response: reqwest::Response) -> WristbandError {
        let body = response.text().await.unwrap_or_default();
        WristbandError::Api {
            status: status.as_u16(),
            body,
        }
    }
}
