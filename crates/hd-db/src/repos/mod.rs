//! Repository modules implementing the Entity Repository and Audit Recorder.
//!
//! Each module adds methods to `HelpdeskService` via `impl HelpdeskService` blocks.

pub mod audit;
pub mod client;
pub mod ticket;
pub mod user;
