//! Service layer: the Entity Repository and Audit Recorder.
//!
//! `HelpdeskService` wraps `HelpdeskDb`. Repo methods are added in
//! `impl HelpdeskService` blocks under `repos/`. Every mutation follows the
//! same protocol:
//! 1. Execute SQL
//! 2. Re-read the row (store-assigned id, code, timestamps)
//! 3. Record one audit entry, best effort

use crate::HelpdeskDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

pub struct HelpdeskService {
    db: HelpdeskDb,
}

impl HelpdeskService {
    /// Service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(HelpdeskDb::open_local(db_path).await?))
    }

    /// Service over the remote backing store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` if the store cannot be reached.
    pub async fn new_remote(
        url: &str,
        api_key: &str,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(
            HelpdeskDb::open_remote(url, api_key, retry).await?,
        ))
    }

    #[must_use]
    pub fn from_db(db: HelpdeskDb) -> Self {
        tracing::debug!(remote = db.is_remote(), "helpdesk store ready");
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &HelpdeskDb {
        &self.db
    }
}
