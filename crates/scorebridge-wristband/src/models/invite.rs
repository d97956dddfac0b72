use serde::{Deserialize, Serialize};

/// Invitation lifecycle states that count as "pending" for list
/// filtering.
const PENDING_STATUSES: [&str; 2] = ["PENDING_INVITE_ACCEPTANCE", "PENDING_EMAIL_VERIFICATION"];

/// An upstream new-user-invitation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserInvitationRequest {
    pub id: String,
    pub tenant_id: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub roles_to_assign: Vec<String>,
    pub expiration_time: Option<String>,
    pub creation_time: Option<String>,
    pub update_time: Option<String>,
    /// Optimistic-concurrency token, opaque to us.
    pub version: Option<String>,
}

impl NewUserInvitationRequest {
    /// Whether the invitation is still awaiting acceptance or email
    /// verification.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| PENDING_STATUSES.contains(&s))
    }
}
