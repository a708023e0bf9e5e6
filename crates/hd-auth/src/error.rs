use hd_core::enums::Role;
use hd_core::errors::CoreError;
use hd_db::error::DatabaseError;
use hd_local::LocalError;
use thiserror::Error;

/// Everything a desk action can fail with.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Bad credentials. Deliberately silent about which part was wrong.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("not signed in; run `hdk auth login`")]
    NotAuthenticated,

    /// Rejected by the authorization matrix before any store call.
    #[error("{role} is not allowed to {action}")]
    AuthorizationDenied { role: Role, action: String },

    /// A caller-side pre-check failed.
    #[error("{0}")]
    Invalid(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error(transparent)]
    Store(DatabaseError),

    #[error(transparent)]
    Local(#[from] LocalError),
}

impl DeskError {
    pub(crate) fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Text for the person at the screen. Never echoes store internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed => "Invalid email or password.".into(),
            Self::NotAuthenticated => "Please sign in first.".into(),
            Self::AuthorizationDenied { action, .. } => {
                format!("You do not have permission to {action}.")
            }
            Self::Invalid(msg) => msg.clone(),
            Self::NotFound { entity, .. } => {
                format!("{entity} not found. The record may have been removed.")
            }
            Self::Store(DatabaseError::StoreUnavailable(_)) => {
                "The helpdesk service is unreachable. Check your connection and try again.".into()
            }
            Self::Store(DatabaseError::ValidationRejected(msg)) => rejection_message(msg),
            Self::Store(_) => "Unexpected error talking to the helpdesk service.".into(),
            Self::Local(e) => e.to_string(),
        }
    }
}

fn rejection_message(raw: &str) -> String {
    if raw.contains("users.email") {
        "A user with this email already exists.".into()
    } else if raw.contains("FOREIGN KEY") {
        "This record is linked to other records and cannot be changed this way.".into()
    } else {
        "The data was rejected. Check the required fields and try again.".into()
    }
}

impl From<DatabaseError> for DeskError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Store(other),
        }
    }
}

impl From<CoreError> for DeskError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Validation(msg) => Self::Invalid(msg),
            CoreError::AuthorizationDenied { role, action } => {
                Self::AuthorizationDenied { role, action }
            }
            CoreError::Other(e) => Self::Store(DatabaseError::Other(e)),
        }
    }
}
