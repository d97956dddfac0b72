//! HTTP boundary of the Scorebridge backend-for-frontend.
//!
//! Everything under `/api` requires a sealed session cookie; the
//! session middleware resolves it to a
//! [`scorebridge_core::SessionContext`] and handlers derive tenant and
//! user scoping exclusively from that context, never from request
//! parameters.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod session;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::api_router;
pub use session::{Session, SessionSealer, SESSION_COOKIE};
pub use state::AppState;
