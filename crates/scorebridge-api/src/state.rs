//! Shared application state.

use crate::session::SessionSealer;
use scorebridge_docstore::DocumentStore;
use scorebridge_secrets::SecretStore;
use scorebridge_wristband::WristbandClient;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Typed client for the upstream identity API.
    pub wristband: Arc<WristbandClient>,
    /// Tenant-partitioned document store (games).
    pub documents: Arc<dyn DocumentStore>,
    /// Encrypted secret storage.
    pub secrets: SecretStore,
    /// Seals and unseals the session cookie.
    pub sealer: Arc<SessionSealer>,
    /// The upstream application this deployment serves, used for tenant
    /// discovery.
    pub application_id: String,
}
