//! Error types for the ratings cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the ratings cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing file or its directory cannot be opened/created.
    /// Fatal at startup; aborts process initialization.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Transient contention acquiring the database write lock.
    #[error("Storage busy: {0}")]
    StorageBusy(String),

    /// Key already present on an INSERT. Internal signal only, consumed
    /// by the facade's set fallback; never surfaced externally.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Stored bytes do not decode to a previously encoded value.
    #[error("Corrupt value: {0}")]
    CorruptValue(String),

    /// No row for the key. Internal signal; surfaced as `None`/no-op.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream provider or resolver failure
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == rusqlite Conversion ==
impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) => match e.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    CacheError::StorageBusy(err.to_string())
                }
                rusqlite::ErrorCode::ConstraintViolation => {
                    CacheError::DuplicateKey(err.to_string())
                }
                rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::PermissionDenied => {
                    CacheError::StorageUnavailable(err.to_string())
                }
                _ => CacheError::Internal(err.to_string()),
            },
            _ => CacheError::Internal(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::StorageBusy(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CacheError::StorageUnavailable(msg)
            | CacheError::DuplicateKey(msg)
            | CacheError::CorruptValue(msg)
            | CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the ratings cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_code_maps_to_storage_busy() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        assert!(matches!(CacheError::from(err), CacheError::StorageBusy(_)));
    }

    #[test]
    fn test_constraint_code_maps_to_duplicate_key() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("UNIQUE constraint failed: entries.key".to_string()),
        );
        assert!(matches!(CacheError::from(err), CacheError::DuplicateKey(_)));
    }

    #[test]
    fn test_other_sqlite_errors_map_to_internal() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(CacheError::from(err), CacheError::Internal(_)));
    }
}
