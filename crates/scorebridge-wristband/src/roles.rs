//! Role enrichment of user lists.

use crate::models::{RoleAssignments, User};
use std::collections::HashMap;

/// Merges batched role assignments onto a list of users.
///
/// Builds a user-id keyed map once, then walks the users, so the merge
/// is linear in users plus assignments rather than quadratic. Users with
/// no entry in the assignments get an empty role list. Entries for
/// unknown user ids are ignored. Per-item resolution failures are logged
/// and the affected users simply stay without roles.
pub fn enrich_users(users: &mut [User], assignments: &RoleAssignments) {
    for failure in &assignments.failures {
        tracing::warn!(
            user_id = failure.user_id.as_deref().unwrap_or("<unknown>"),
            code = failure.code.as_deref().unwrap_or("<none>"),
            "role resolution failed for one user in the batch"
        );
    }

    let mut skus_by_user: HashMap<&str, Vec<String>> =
        HashMap::with_capacity(assignments.items.len());
    for entry in &assignments.items {
        skus_by_user.insert(
            entry.user_id.as_str(),
            entry.roles.iter().map(|r| r.sku().to_string()).collect(),
        );
    }

    for user in users.iter_mut() {
        user.roles = skus_by_user.remove(user.id.as_str()).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::{Role, RoleResolutionFailure, UserRoles};

    fn user(id: &str) -> User {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    fn role(name: &str) -> Role {
        Role {
            id: format!("role-{name}"),
            name: name.into(),
            display_name: None,
            description: None,
            owner_type: None,
            owner_id: None,
            tenant_visibility: None,
            metadata: None,
        }
    }

    #[test]
    fn assigns_skus_and_defaults_to_empty() {
        let mut users = vec![user("u1"), user("u2"), user("u3")];
        let assignments = RoleAssignments {
            items: vec![
                UserRoles {
                    user_id: "u1".into(),
                    roles: vec![role("app:scorebridge:admin")],
                },
                UserRoles {
                    user_id: "u3".into(),
                    roles: vec![role("viewer"), role("app:scorebridge:scorer")],
                },
            ],
            failures: vec![],
        };

        enrich_users(&mut users, &assignments);

        assert_eq!(users[0].roles, vec!["admin"]);
        assert!(users[1].roles.is_empty());
        assert_eq!(users[2].roles, vec!["viewer", "scorer"]);
    }

    #[test]
    fn ignores_assignments_for_unknown_users() {
        let mut users = vec![user("u1")];
        let assignments = RoleAssignments {
            items: vec![UserRoles {
                user_id: "ghost".into(),
                roles: vec![role("admin")],
            }],
            failures: vec![],
        };

        enrich_users(&mut users, &assignments);
        assert!(users[0].roles.is_empty());
    }

    #[test]
    fn partial_failures_do_not_block_the_rest() {
        let mut users = vec![user("u1"), user("u2")];
        let assignments = RoleAssignments {
            items: vec![UserRoles {
                user_id: "u2".into(),
                roles: vec![role("app:scorebridge:owner")],
            }],
            failures: vec![RoleResolutionFailure {
                code: Some("notFound".into()),
                message: Some("no such user".into()),
                index: Some(0),
                user_id: Some("u1".into()),
            }],
        };

        enrich_users(&mut users, &assignments);
        assert!(users[0].roles.is_empty());
        assert_eq!(users[1].roles, vec!["owner"]);
    }
}
