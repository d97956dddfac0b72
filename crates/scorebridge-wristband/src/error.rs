//! Gateway error types.

use thiserror::Error;

pub type WristbandResult<T> = Result<T, WristbandError>;

/// Errors from the upstream API gateway.
///
/// Upstream failures are never retried here; callers decide whether a
/// status is fatal, forwardable, or a reason to degrade.
#[derive(Debug, Error)]
pub enum WristbandError {
    /// The client was constructed with unusable configuration.
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// The request never completed (connect failure, timeout, TLS).
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream returned a non-success status. The body is kept
    /// verbatim so callers can forward it.
    #[error("upstream API error (status {status})")]
    Api { status: u16, body: String },

    /// A success response body could not be decoded.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// The upstream violated its own pagination contract.
    #[error("upstream pagination protocol violation: {0}")]
    Pagination(String),
}

impl WristbandError {
    /// The upstream HTTP status, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the upstream rejected the caller's credentials or
    /// permissions (401 or 403).
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the upstream reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let unauthorized = WristbandError::Api {
            status: 401,
            body: "{}".into(),
        };
        let forbidden = WristbandError::Api {
            status: 403,
            body: "{}".into(),
        };
        let missing = WristbandError::Api {
            status: 404,
            body: "{}".into(),
        };
        let server = WristbandError::Api {
            status: 502,
            body: "{}".into(),
        };

        assert!(unauthorized.is_forbidden());
        assert!(forbidden.is_forbidden());
        assert!(!missing.is_forbidden());
        assert!(missing.is_not_found());
        assert_eq!(server.status(), Some(502));
        assert_eq!(
            WristbandError::InvalidConfig("bad".into()).status(),
            None
        );
    }
}
