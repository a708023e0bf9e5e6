//! The persisted session slot.

use hd_core::entities::User;

use crate::error::LocalError;
use crate::keyed::{KeyedFileStore, Loaded};

/// Fixed key for the authenticated user record.
pub const SESSION_KEY: &str = "helpdesk_session_user";

/// Stores the authenticated [`User`] (which has no password field) with
/// RFC 3339 dates.
#[derive(Debug, Clone)]
pub struct SessionStore {
    files: KeyedFileStore,
}

impl SessionStore {
    #[must_use]
    pub const fn new(files: KeyedFileStore) -> Self {
        Self { files }
    }

    /// The stored user, or `None`. Unparseable content is deleted and treated
    /// as no session.
    ///
    /// # Errors
    ///
    /// Returns `LocalError::Io` if the file cannot be read or a corrupt file
    /// cannot be removed.
    pub fn load(&self) -> Result<Option<User>, LocalError> {
        match self.files.load::<User>(SESSION_KEY)? {
            Loaded::Missing => Ok(None),
            Loaded::Value(user) => Ok(Some(user)),
            Loaded::Corrupt(error) => {
                tracing::warn!(%error, "stored session is unreadable; clearing it");
                self.files.remove(SESSION_KEY)?;
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `LocalError` if the file cannot be written.
    pub fn save(&self, user: &User) -> Result<(), LocalError> {
        self.files.save(SESSION_KEY, user)
    }

    /// # Errors
    ///
    /// Returns `LocalError::Io` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), LocalError> {
        self.files.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hd_core::enums::Role;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            id: "usr-0001".into(),
            name: "Admin".into(),
            email: "admin@helpdesk.com".into(),
            role: Role::Admin,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single().unwrap(),
        }
    }

    #[test]
    fn save_and_restore_user() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(KeyedFileStore::new(tmp.path()));
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));

        let raw = std::fs::read_to_string(tmp.path().join("helpdesk_session_user.json")).unwrap();
        assert!(raw.contains("2025-01-02T03:04:05Z"), "{raw}");
        assert!(!raw.contains("password"));
    }

    #[test]
    fn corrupt_session_is_cleared() {
        let tmp = tempfile::TempDir::new().unwrap();
        let files = KeyedFileStore::new(tmp.path());
        std::fs::write(files.path_for(SESSION_KEY), r#"{"id": 42"#).unwrap();

        let store = SessionStore::new(files.clone());
        assert_eq!(store.load().unwrap(), None);
        assert!(!files.path_for(SESSION_KEY).exists());
    }

    #[test]
    fn clear_removes_session() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(KeyedFileStore::new(tmp.path()));
        store.save(&user()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
