//! Strongly typed identifiers.
//!
//! Wristband resource identifiers are opaque strings (not UUIDs), so these
//! newtypes wrap `String`. They exist to prevent accidental misuse of
//! different ID kinds at compile time: a `UserId` cannot be passed where a
//! `TenantId` is expected, and neither can be built from a bare string
//! without saying so explicitly.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Macro to define a strongly-typed, string-backed ID type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a Wristband tenant.
    ///
    /// Every document-store path and every tenant-scoped upstream call is
    /// keyed by one of these; it always comes from the session, never from
    /// request parameters.
    TenantId
);

define_id!(
    /// Identifier of a Wristband user.
    UserId
);
