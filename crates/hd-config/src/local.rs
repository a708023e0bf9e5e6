//! Location of the process-local session and settings files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    /// Directory for `helpdesk_session_user.json` and
    /// `helpdesk_print_settings.json`. Empty means the platform data dir.
    #[serde(default)]
    pub dir: String,
}

impl LocalConfig {
    /// The configured directory, or `<data dir>/helpdesk`, or `.helpdesk` as a
    /// last resort when the platform has no data dir.
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        if !self.dir.is_empty() {
            return PathBuf::from(&self.dir);
        }
        dirs::data_dir().map_or_else(|| PathBuf::from(".helpdesk"), |p| p.join("helpdesk"))
    }
}
