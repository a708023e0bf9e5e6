//! ID prefix constants.
//!
//! IDs are generated by the backing store as `{prefix}-{8 hex chars}`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_CLIENT: &str = "cli";
pub const PREFIX_TICKET: &str = "tkt";
pub const PREFIX_AUDIT: &str = "aud";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_USER, PREFIX_CLIENT, PREFIX_TICKET, PREFIX_AUDIT];

/// Ticket codes are `HD-` followed by a zero-padded sequence number.
pub const TICKET_CODE_PREFIX: &str = "HD-";
