//! API error type and its HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use scorebridge_docstore::DocStoreError;
use scorebridge_secrets::SecretError;
use scorebridge_wristband::WristbandError;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    /// Requested resource absent.
    #[error("{0}")]
    NotFound(String),

    /// Malformed caller input.
    #[error("{0}")]
    Validation(String),

    /// Upstream 4xx other than auth failures; the status and body are
    /// forwarded to the caller verbatim.
    #[error("upstream rejected the request (status {status})")]
    Upstream { status: u16, body: String },

    /// Upstream 5xx, transport failure, or undecodable upstream reply.
    #[error("{0}")]
    BadGateway(String),

    /// Secret encryption is not configured.
    #[error("secret storage is not available")]
    SecretsUnavailable,

    /// Anything we will not explain to the caller.
    #[error("{0}")]
    Internal(String),
}

/// Error response format for API errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ApiError::Upstream { status, body } => {
                // Forward the upstream's own 4xx body so the frontend
                // sees the same machine-readable codes it would get
                // talking to the upstream directly.
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::BAD_REQUEST);
                return (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body.clone(),
                )
                    .into_response();
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(error = %msg, "upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "The upstream identity service failed".to_string(),
                )
            }
            ApiError::SecretsUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "secrets_unavailable",
                "Secret storage is not configured".to_string(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error_code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<WristbandError> for ApiError {
    fn from(err: WristbandError) -> Self {
        match err {
            WristbandError::Api { status, body } => {
                if status == 401 || status == 403 {
                    ApiError::Forbidden("Insufficient permissions".to_string())
                } else if (400..500).contains(&status) {
                    ApiError::Upstream { status, body }
                } else {
                    ApiError::BadGateway(format!("upstream returned status {status}"))
                }
            }
            WristbandError::Transport(e) => ApiError::BadGateway(format!("transport error: {e}")),
            WristbandError::Decode(msg) | WristbandError::Pagination(msg) => {
                ApiError::BadGateway(msg)
            }
            WristbandError::InvalidConfig(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<SecretError> for ApiError {
    fn from(err: SecretError) -> Self {
        match err {
            SecretError::EncryptionUnavailable => ApiError::SecretsUnavailable,
            SecretError::NotFound(name) => ApiError::NotFound(format!("Secret '{name}' not found")),
            SecretError::Validation(msg) => ApiError::Validation(msg),
            SecretError::DecryptionFailed(_)
            | SecretError::EncryptionFailed(_)
            | SecretError::InvalidKey(_)
            | SecretError::Corrupt(_) => ApiError::Internal(err.to_string()),
            SecretError::Store(e) => e.into(),
        }
    }
}

impl From<DocStoreError> for ApiError {
    fn from(err: DocStoreError) -> Self {
        match err {
            DocStoreError::NotFound { collection, doc_id } => {
                ApiError::NotFound(format!("{collection}/{doc_id} not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
