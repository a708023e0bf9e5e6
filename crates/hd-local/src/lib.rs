//! # hd-local
//!
//! Small JSON records kept on the local machine, one file per fixed key:
//! - `helpdesk_session_user`: the authenticated user, without password
//! - `helpdesk_print_settings`: the print-header settings
//!
//! Files live under a single directory (see `hd_config::LocalConfig`) and are
//! written with owner-only permissions on Unix.

mod error;
mod keyed;
mod session;
mod settings;

pub use error::LocalError;
pub use keyed::{KeyedFileStore, Loaded};
pub use session::{SESSION_KEY, SessionStore};
pub use settings::{SETTINGS_KEY, SettingsStore, logo_data_url};
