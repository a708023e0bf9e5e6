//! Cross-cutting error types for Helpdesk.
//!
//! Store-specific errors live in `hd-db`; the gate-level error that the UI
//! sees lives in `hd-auth`.

use thiserror::Error;

use crate::enums::Role;

/// Errors that can be raised by any Helpdesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed a caller-side pre-check (missing required field, bad format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The authorization matrix rejected the action for this role.
    #[error("{role} is not allowed to {action}")]
    AuthorizationDenied { role: Role, action: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
