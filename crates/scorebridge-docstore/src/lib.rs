//! Tenant-partitioned JSON document store.
//!
//! All application-owned data (games, encrypted secrets) lives in
//! documents addressed by `(tenant, collection, doc id)`. The tenant
//! segment always comes from the authenticated session, which is what
//! enforces tenant isolation: there is no cross-tenant read path at all.
//!
//! Two backends implement the [`DocumentStore`] trait: a Postgres JSONB
//! implementation for production and an in-memory implementation for
//! tests and service-level unit coverage.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod store;

pub use error::{DocStoreError, DocStoreResult};
pub use memory::MemoryStore;
pub use postgres::PgDocStore;
pub use query::{Filter, Query, SortDirection};
pub use store::{Document, DocumentStore};
