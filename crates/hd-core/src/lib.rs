//! # hd-core
//!
//! Core types shared across all Helpdesk crates:
//! - Entity structs for users, clients, tickets, and audit log entries
//! - Role, status, priority, and audit enums
//! - ID prefix constants
//! - The authorization matrix (pure role → page / action decisions)
//! - Creation inputs with required-field pre-checks
//! - Dashboard and report aggregation over ticket lists
//! - Print-header settings
//! - Cross-cutting error types

pub mod access;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod reports;
pub mod settings;
