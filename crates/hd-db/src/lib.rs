//! # hd-db
//!
//! Backing store access for Helpdesk.
//!
//! Holds users, clients, tickets, and the audit log in libSQL: a remote
//! database addressed by URL and API key in production, a local file or
//! `:memory:` in tests. Every repository method lives on [`HelpdeskService`]
//! and every successful mutation appends one audit entry.

pub mod error;
pub mod helpers;
mod migrations;
pub mod password;
pub mod repos;
pub mod retry;
pub mod service;
pub mod store;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;
use retry::{RetryConfig, is_transient_error};

pub use repos::audit::AuditFilter;
pub use service::HelpdeskService;
pub use store::HelpdeskStore;

/// Central database handle.
///
/// Wraps a libSQL database and connection. Provides ID generation and the
/// retrying `execute_with` / `query_with` entry points the repos go through.
pub struct HelpdeskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
    retry: RetryConfig,
}

impl HelpdeskDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::connect(db, false, RetryConfig::default()).await
    }

    /// Open the remote backing store at `url`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` if the service cannot be
    /// reached, or `DatabaseError::Migration` if the schema cannot be applied.
    pub async fn open_remote(
        url: &str,
        api_key: &str,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), api_key.to_string())
            .build()
            .await?;
        Self::connect(db, true, retry).await
    }

    async fn connect(
        db: libsql::Database,
        remote: bool,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| match DatabaseError::from(e) {
                unavailable @ DatabaseError::StoreUnavailable(_) => unavailable,
                other => DatabaseError::Migration(format!("PRAGMA foreign_keys: {other}")),
            })?;

        let hd_db = Self {
            db,
            conn,
            remote,
            retry,
        };
        hd_db.run_migrations().await?;
        Ok(hd_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tkt-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                || (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Execute a statement, retrying transient remote failures.
    ///
    /// `params` is called once per attempt since libSQL consumes parameters.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` once retries are exhausted or on the first
    /// non-transient failure.
    pub async fn execute_with<P, F>(&self, sql: &str, params: F) -> Result<u64, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let mut attempt = 1;
        loop {
            match self.conn.execute(sql, params()).await {
                Ok(n) => return Ok(n),
                Err(e) if self.should_retry(attempt, &e) => {
                    self.backoff(attempt, &e).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run a query, retrying transient remote failures.
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute_with`].
    pub async fn query_with<P, F>(&self, sql: &str, params: F) -> Result<libsql::Rows, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let mut attempt = 1;
        loop {
            match self.conn.query(sql, params()).await {
                Ok(rows) => return Ok(rows),
                Err(e) if self.should_retry(attempt, &e) => {
                    self.backoff(attempt, &e).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn should_retry(&self, attempt: u32, e: &libsql::Error) -> bool {
        self.remote && attempt < self.retry.max_attempts && is_transient_error(e)
    }

    async fn backoff(&self, attempt: u32, e: &libsql::Error) {
        let delay = self.retry.delay_for(attempt);
        tracing::debug!(attempt, ?delay, error = %e, "transient store error, retrying");
        tokio::time::sleep(delay).await;
    }
}
