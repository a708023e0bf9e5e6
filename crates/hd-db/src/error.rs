//! Database error types for hd-db.

use thiserror::Error;

/// Errors from backing store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store could not be reached (network down, connection refused).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected the write (duplicate email, bad state code,
    /// referenced row, immutable ticket code).
    #[error("Rejected by store: {0}")]
    ValidationRejected(String),

    /// No row with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error that is neither a constraint nor a connectivity failure.
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<libsql::Error> for DatabaseError {
    fn from(err: libsql::Error) -> Self {
        let msg = err.to_string();
        if is_constraint_violation(&msg) {
            Self::ValidationRejected(msg)
        } else if is_connectivity_failure(&msg) {
            Self::StoreUnavailable(msg)
        } else {
            Self::LibSql(err)
        }
    }
}

fn is_constraint_violation(msg: &str) -> bool {
    msg.contains("constraint failed")
}

fn is_connectivity_failure(msg: &str) -> bool {
    let msg = msg.to_ascii_lowercase();
    [
        "failed to connect",
        "connection refused",
        "connection reset",
        "error sending request",
        "dns error",
        "timed out",
    ]
    .iter()
    .any(|needle| msg.contains(needle))
}
