//! Entity structs for all Helpdesk domain objects, plus the creation inputs
//! callers fill before asking the repository to insert a row.
//!
//! Each entity maps to one table in the backing store. Read projections never
//! carry a user's password; it only exists on [`NewUser`].

mod audit;
mod client;
mod ticket;
mod user;

pub use audit::AuditLogEntry;
pub use client::{Client, NewClient, validate_state_code};
pub use ticket::{NewTicket, Ticket};
pub use user::{NewUser, User, normalize_email};

use crate::errors::CoreError;

/// Reject a blank required field.
pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}
