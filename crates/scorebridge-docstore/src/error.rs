//! Document store error types.

use thiserror::Error;

pub type DocStoreResult<T> = Result<T, DocStoreError>;

/// Errors returned by document store operations.
///
/// A missing document is only an error for operations that require one
/// to exist (partial update); plain reads return `Ok(None)`.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// The target document does not exist.
    #[error("document not found: {collection}/{doc_id}")]
    NotFound { collection: String, doc_id: String },

    /// The stored document is not a JSON object, so it cannot take a
    /// field-level partial update.
    #[error("document is not a JSON object: {collection}/{doc_id}")]
    NotAnObject { collection: String, doc_id: String },

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DocStoreError {
    pub(crate) fn not_found(collection: &str, doc_id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
        }
    }

    pub(crate) fn not_an_object(collection: &str, doc_id: &str) -> Self {
        Self::NotAnObject {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
        }
    }
}
