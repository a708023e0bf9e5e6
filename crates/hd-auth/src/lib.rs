//! # hd-auth
//!
//! Who is acting, and what they may do.
//!
//! - [`SessionHolder`]: the single "current user" slot, filled by a successful
//!   login and cleared by logout, optionally persisted via `hd-local`.
//! - [`Desk`]: every screen action as a method that takes the acting identity
//!   explicitly, consults the authorization matrix, runs caller pre-checks,
//!   and only then calls the store.

pub mod error;
pub mod gate;
pub mod session;

pub use error::DeskError;
pub use gate::{AuditSubject, Desk};
pub use session::SessionHolder;
