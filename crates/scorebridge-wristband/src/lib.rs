//! Wristband upstream API gateway.
//!
//! A typed HTTP client for the Wristband identity platform REST API
//! (`https://{application-vanity-domain}/api/v1`), plus the aggregation
//! logic layered on top of it:
//!
//! - [`client::WristbandClient`] - one method per upstream operation, with a
//!   uniform status/body error contract and no automatic retries.
//! - [`pagination`] - fetch-all-pages aggregation for the upstream's
//!   fixed-size page collections.
//! - [`roles`] - batched role resolution merged back onto user records
//!   without an N+1 call pattern.
//! - [`pem`] - SAML signing-certificate normalization.

pub mod client;
pub mod error;
pub mod models;
pub mod pagination;
pub mod pem;
pub mod roles;

pub use client::WristbandClient;
pub use error::{WristbandError, WristbandResult};
