//! Unified error handling for document storage.
//!
//! Two layers of errors live here:
//! - [`StoreError`]: raised by store clients, in the store's own terms
//! - [`RepositoryError`]: the only error repository callers ever see
//!
//! Every store failure crosses the repository boundary as
//! [`RepositoryError::DatabaseAccess`], keeping the original message.

use domain::Identifier;
use thiserror::Error;

/// Broad category of a store failure.
///
/// Carried as metadata only. Callers are expected to treat every
/// `DatabaseAccess` failure the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store could not be reached or the connection dropped
    Connectivity,
    /// The store did not answer in time
    Timeout,
    /// A record or entity could not be converted
    Malformed,
    /// Any other fault reported by the driver
    Driver,
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoreErrorKind::Connectivity => "connectivity",
            StoreErrorKind::Timeout => "timeout",
            StoreErrorKind::Malformed => "malformed",
            StoreErrorKind::Driver => "driver",
        };
        f.write_str(name)
    }
}

/// Failure raised by a store client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
}

/// Convenience constructors
impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Connectivity, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Malformed, message)
    }

    pub fn driver(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Driver, message)
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::malformed(err.to_string())
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{ConnAcquireErr, DbErr};

        let kind = match &err {
            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => StoreErrorKind::Timeout,
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => StoreErrorKind::Connectivity,
            DbErr::Json(_) | DbErr::Type(_) | DbErr::TryIntoErr { .. } => StoreErrorKind::Malformed,
            _ => StoreErrorKind::Driver,
        };

        StoreError::new(kind, err.to_string())
    }
}

/// Store client result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Any failure of the underlying store, whatever its cause
    #[error("Database access failure: {message}")]
    DatabaseAccess {
        message: String,
        kind: StoreErrorKind,
    },

    /// A required document does not exist
    #[error("{entity} with id {id} not found")]
    DocumentNotFound { entity: String, id: String },
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::DatabaseAccess {
            message: err.message,
            kind: err.kind,
        }
    }
}

impl RepositoryError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::DatabaseAccess { .. } => "DATABASE_ACCESS_FAILURE",
            RepositoryError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
        }
    }

    /// Get user-facing message (hides store diagnostics)
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::DatabaseAccess { message, kind } => {
                tracing::error!(kind = %kind, "Database access failure: {}", message);
                "A database error occurred".to_string()
            }
            RepositoryError::DocumentNotFound { .. } => self.to_string(),
        }
    }

    /// Check whether this is the uniform store failure
    pub fn is_database_access(&self) -> bool {
        matches!(self, RepositoryError::DatabaseAccess { .. })
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        RepositoryError::DocumentNotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Extension trait for Option -> RepositoryError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found<I: Identifier>(self, entity: &str, id: &I) -> RepositoryResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found<I: Identifier>(self, entity: &str, id: &I) -> RepositoryResult<T> {
        self.ok_or_else(|| RepositoryError::not_found(entity, id.to_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_keeps_message() {
        let err = StoreError::connectivity("connection refused");
        assert_eq!(err.kind(), StoreErrorKind::Connectivity);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_store_error_becomes_database_access() {
        let err: RepositoryError = StoreError::timeout("operation timed out after 30s").into();

        assert!(err.is_database_access());
        assert_eq!(err.code(), "DATABASE_ACCESS_FAILURE");
        assert!(err.to_string().contains("operation timed out after 30s"));
        assert_eq!(
            err,
            RepositoryError::DatabaseAccess {
                message: "operation timed out after 30s".to_string(),
                kind: StoreErrorKind::Timeout,
            }
        );
    }

    #[test]
    fn test_json_error_is_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StoreError::from(json_err);
        assert_eq!(err.kind(), StoreErrorKind::Malformed);
    }

    #[test]
    fn test_user_message_hides_store_details() {
        let err: RepositoryError = StoreError::driver("relation \"documents\" does not exist").into();
        assert_eq!(err.user_message(), "A database error occurred");
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_not_found("Group", &"42".to_string()).unwrap_err();

        assert_eq!(err.code(), "DOCUMENT_NOT_FOUND");
        assert_eq!(err.to_string(), "Group with id 42 not found");
        assert!(!err.is_database_access());

        assert_eq!(Some(1u8).ok_or_not_found("Group", &7i64).unwrap(), 1);
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_db_err_classification() {
        use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};

        let timeout = StoreError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert_eq!(timeout.kind(), StoreErrorKind::Timeout);

        let conn = StoreError::from(DbErr::Conn(RuntimeErr::Internal("refused".to_string())));
        assert_eq!(conn.kind(), StoreErrorKind::Connectivity);
        assert!(conn.message().contains("refused"));

        let json = StoreError::from(DbErr::Json("bad body".to_string()));
        assert_eq!(json.kind(), StoreErrorKind::Malformed);

        let other = StoreError::from(DbErr::Custom("boom".to_string()));
        assert_eq!(other.kind(), StoreErrorKind::Driver);
    }
}
