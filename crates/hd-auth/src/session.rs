//! The Session/Identity Holder.

use hd_core::entities::User;
use hd_core::identity::Actor;
use hd_db::HelpdeskStore;
use hd_local::SessionStore;

use crate::error::DeskError;

/// Holds the authenticated user, never a password.
///
/// In-memory by default; [`SessionHolder::persistent`] mirrors every change to
/// the `helpdesk_session_user` record so a later process resumes the session.
#[derive(Debug, Default)]
pub struct SessionHolder {
    current: Option<User>,
    persisted: Option<SessionStore>,
}

impl SessionHolder {
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            current: None,
            persisted: None,
        }
    }

    /// Restore whatever session the store holds.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Local` if the session file cannot be read.
    pub fn persistent(store: SessionStore) -> Result<Self, DeskError> {
        let current = store.load()?;
        Ok(Self {
            current,
            persisted: Some(store),
        })
    }

    /// Authenticate and, on success, become that user.
    ///
    /// Any failure (unknown email, wrong password, store error) yields
    /// `AuthenticationFailed` and leaves the slot unchanged.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed`, or `Local` if the session cannot be persisted.
    pub async fn login<S: HelpdeskStore + ?Sized>(
        &mut self,
        store: &S,
        email: &str,
        password: &str,
    ) -> Result<User, DeskError> {
        let user = match store.authenticate(email, password).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!("login rejected");
                return Err(DeskError::AuthenticationFailed);
            }
            Err(error) => {
                tracing::warn!(%error, "login lookup failed");
                return Err(DeskError::AuthenticationFailed);
            }
        };

        if let Some(ref persisted) = self.persisted {
            persisted.save(&user)?;
        }
        tracing::info!(user_id = %user.id, role = %user.role, "signed in");
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Re-read the signed-in user from the store.
    ///
    /// The cached record (and with it the actor's role) is replaced by the
    /// stored one. A user that no longer exists ends the session.
    ///
    /// # Errors
    ///
    /// `Store` if the lookup fails, `Local` if the persisted copy cannot be
    /// rewritten or removed.
    pub async fn refresh<S: HelpdeskStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<(), DeskError> {
        let Some(ref cached) = self.current else {
            return Ok(());
        };

        let stored = store.get_user(&cached.id).await?;
        match stored {
            Some(fresh) => {
                if fresh.role != cached.role {
                    tracing::info!(
                        user_id = %fresh.id,
                        from = %cached.role,
                        to = %fresh.role,
                        "session role changed"
                    );
                }
                if let Some(ref persisted) = self.persisted {
                    persisted.save(&fresh)?;
                }
                self.current = Some(fresh);
            }
            None => {
                tracing::warn!(user_id = %cached.id, "session user no longer exists");
                self.logout()?;
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DeskError::Local` if the persisted session cannot be removed.
    pub fn logout(&mut self) -> Result<(), DeskError> {
        if let Some(ref persisted) = self.persisted {
            persisted.clear()?;
        }
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        self.current.as_ref().map(Actor::from)
    }

    /// # Errors
    ///
    /// Returns `DeskError::NotAuthenticated` when nobody is signed in.
    pub fn require_actor(&self) -> Result<Actor, DeskError> {
        self.actor().ok_or(DeskError::NotAuthenticated)
    }
}
