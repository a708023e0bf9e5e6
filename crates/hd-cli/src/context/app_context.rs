use anyhow::Context;
use hd_auth::{Desk, SessionHolder};
use hd_config::HelpdeskConfig;
use hd_db::HelpdeskService;
use hd_db::retry::RetryConfig;
use hd_local::{KeyedFileStore, SessionStore, SettingsStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub desk: Desk<HelpdeskService>,
    pub session: SessionHolder,
    pub settings: SettingsStore,
    pub config: HelpdeskConfig,
}

impl AppContext {
    /// Connect to the backing store and restore any saved session.
    ///
    /// The caller has already checked that the store is configured.
    pub async fn init(config: HelpdeskConfig) -> anyhow::Result<Self> {
        let store = &config.store;
        let retry = RetryConfig::with_max_attempts(store.max_attempts);
        let service = HelpdeskService::new_remote(&store.url, &store.api_key, retry)
            .await
            .context("failed to connect to the helpdesk store")?;

        let local_dir = config.local.resolved_dir();
        tracing::debug!(dir = %local_dir.display(), "local state directory");
        let files = KeyedFileStore::new(&local_dir);

        let mut session = SessionHolder::persistent(SessionStore::new(files.clone()))
            .context("failed to restore the saved session")?;
        session
            .refresh(&service)
            .await
            .context("failed to refresh the saved session")?;
        let settings = SettingsStore::new(files);

        Ok(Self {
            desk: Desk::new(service),
            session,
            settings,
            config,
        })
    }
}
