//! Scorebridge core library.
//!
//! Shared types used across the Scorebridge crates:
//!
//! - [`ids`] - Strongly typed identifiers (TenantId, UserId)
//! - [`session`] - The per-request authenticated session context

pub mod ids;
pub mod session;

pub use ids::{TenantId, UserId};
pub use session::{AccessToken, SessionContext};
