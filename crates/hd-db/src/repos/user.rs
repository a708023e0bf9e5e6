//! User repository: CRUD, email lookup, and password authentication.
//!
//! The password hash column is only read by [`HelpdeskService::authenticate`];
//! every other projection leaves it out.

use hd_core::entities::{NewUser, User, normalize_email};
use hd_core::enums::{AuditAction, AuditEntity};
use hd_core::identity::Actor;
use hd_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{SetClauses, parse_datetime, parse_enum};
use crate::password::{hash_password, verify_password};
use crate::service::HelpdeskService;
use crate::updates::user::UserUpdate;

const SELECT_COLS: &str = "id, name, email, role, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl HelpdeskService {
    /// All users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` when the store cannot be reached.
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY created_at, rowid"),
                || (),
            )
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"),
                || [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Case-insensitive lookup by email.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let email = normalize_email(email);
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                || [email.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_users(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .query_with("SELECT COUNT(*) FROM users", || ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
    }

    /// Insert a user with an Argon2id-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ValidationRejected` for a duplicate email (any
    /// case) or a blank name.
    pub async fn create_user(
        &self,
        actor: Option<&Actor>,
        input: NewUser,
    ) -> Result<User, DatabaseError> {
        let email = input.normalized_email();
        let password_hash = hash_password(&input.password)?;
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .execute_with(
                "INSERT INTO users (id, name, email, password_hash, role) VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.name.trim(),
                        email.as_str(),
                        password_hash.as_str(),
                        input.role.as_str()
                    ]
                },
            )
            .await?;

        let user = self
            .get_user(&id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", &id))?;

        self.record_audit(
            actor,
            AuditAction::Create,
            AuditEntity::User,
            Some(&user.id),
            &AuditEntity::User.summary(&user.name, AuditAction::Create),
        )
        .await;

        Ok(user)
    }

    /// Apply a partial update. An empty patch returns the current user
    /// without writing or auditing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no user has this id.
    pub async fn update_user(
        &self,
        actor: Option<&Actor>,
        user_id: &str,
        update: UserUpdate,
    ) -> Result<User, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.trim().to_string());
        }
        if let Some(ref email) = update.email {
            sets.push("email", normalize_email(email));
        }
        if let Some(role) = update.role {
            sets.push("role", role.as_str());
        }

        if sets.is_empty() {
            return self
                .get_user(user_id)
                .await?
                .ok_or_else(|| DatabaseError::not_found("User", user_id));
        }

        let (sql, params) = sets.into_update("users", user_id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("User", user_id));
        }

        let updated = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", user_id))?;

        self.record_audit(
            actor,
            AuditAction::Update,
            AuditEntity::User,
            Some(user_id),
            &AuditEntity::User.summary(&updated.name, AuditAction::Update),
        )
        .await;

        Ok(updated)
    }

    /// Hard delete. Returns `false` (and audits nothing) when the id is unknown.
    /// Tickets assigned to the user become unassigned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn delete_user(
        &self,
        actor: Option<&Actor>,
        user_id: &str,
    ) -> Result<bool, DatabaseError> {
        let Some(existing) = self.get_user(user_id).await? else {
            return Ok(false);
        };

        let deleted = self
            .db()
            .execute_with("DELETE FROM users WHERE id = ?1", || [user_id])
            .await?;
        if deleted == 0 {
            return Ok(false);
        }

        self.record_audit(
            actor,
            AuditAction::Delete,
            AuditEntity::User,
            Some(user_id),
            &AuditEntity::User.summary(&existing.name, AuditAction::Delete),
        )
        .await;

        Ok(true)
    }

    /// Check credentials. `None` covers both an unknown email and a wrong
    /// password so callers cannot tell them apart.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only when the store call itself fails.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let email = normalize_email(email);
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS}, password_hash FROM users WHERE email = ?1"),
                || [email.as_str()],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let hash: String = row.get(5)?;
        if verify_password(password, &hash) {
            Ok(Some(row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::AuditFilter;
    use crate::error::DatabaseError;
    use crate::test_support::{admin_actor, seed_user, test_service};
    use crate::updates::user::UserUpdateBuilder;
    use hd_core::entities::NewUser;
    use hd_core::enums::{AuditAction, AuditEntity, Role};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::ManagerAdmin)]
    #[case(Role::Manager)]
    #[case(Role::Technician)]
    #[tokio::test]
    async fn create_then_lookup_by_email(#[case] role: Role) {
        let svc = test_service().await;
        let created = svc
            .create_user(
                Some(&admin_actor()),
                NewUser::new("Ana Lima", "Ana.Lima@HelpDesk.com", "pw", role),
            )
            .await
            .unwrap();
        assert!(created.id.starts_with("usr-"));
        assert_eq!(created.email, "ana.lima@helpdesk.com");

        let found = svc.get_user_by_email("ANA.LIMA@helpdesk.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.role, role);
    }

    #[tokio::test]
    async fn duplicate_email_rejected_case_insensitively() {
        let svc = test_service().await;
        seed_user(&svc, "dup@helpdesk.com", Role::Manager).await;
        let err = svc
            .create_user(
                Some(&admin_actor()),
                NewUser::new("Other", "DUP@helpdesk.com", "pw", Role::Technician),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ValidationRejected(_)), "{err}");
    }

    #[tokio::test]
    async fn create_records_one_audit_entry() {
        let svc = test_service().await;
        let user = seed_user(&svc, "tech@helpdesk.com", Role::Technician).await;
        let entries = svc.list_audit_logs(&AuditFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert_eq!(entries[0].entity, AuditEntity::User);
        assert_eq!(entries[0].entity_id.as_deref(), Some(user.id.as_str()));
        assert_eq!(entries[0].details, "User 'Test User' created.");
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let svc = test_service().await;
        let user = seed_user(&svc, "mgr@helpdesk.com", Role::Manager).await;
        let updated = svc
            .update_user(
                Some(&admin_actor()),
                &user.id,
                UserUpdateBuilder::new().email("New.Mgr@Helpdesk.com").build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "new.mgr@helpdesk.com");
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.role, Role::Manager);
    }

    #[tokio::test]
    async fn empty_patch_writes_and_audits_nothing() {
        let svc = test_service().await;
        let user = seed_user(&svc, "mgr@helpdesk.com", Role::Manager).await;
        let same = svc
            .update_user(Some(&admin_actor()), &user.id, UserUpdateBuilder::new().build())
            .await
            .unwrap();
        assert_eq!(same, user);
        assert_eq!(svc.list_audit_logs(&AuditFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .update_user(
                Some(&admin_actor()),
                "usr-missing",
                UserUpdateBuilder::new().name("X").build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_missing_user_returns_false_without_audit() {
        let svc = test_service().await;
        assert!(!svc.delete_user(Some(&admin_actor()), "usr-missing").await.unwrap());
        assert!(svc.list_audit_logs(&AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_user_audits_with_name() {
        let svc = test_service().await;
        let user = seed_user(&svc, "gone@helpdesk.com", Role::Technician).await;
        assert!(svc.delete_user(Some(&admin_actor()), &user.id).await.unwrap());
        assert!(svc.get_user(&user.id).await.unwrap().is_none());

        let head = &svc.list_audit_logs(&AuditFilter::default()).await.unwrap()[0];
        assert_eq!(head.action, AuditAction::Delete);
        assert_eq!(head.details, "User 'Test User' deleted.");
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let svc = test_service().await;
        let user = seed_user(&svc, "admin@helpdesk.com", Role::Admin).await;

        let ok = svc.authenticate("Admin@Helpdesk.com", "s3cret").await.unwrap();
        assert_eq!(ok, Some(user));
        assert_eq!(svc.authenticate("admin@helpdesk.com", "wrong").await.unwrap(), None);
        assert_eq!(svc.authenticate("nobody@helpdesk.com", "s3cret").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_oldest_first_and_stable() {
        let svc = test_service().await;
        for email in ["a@helpdesk.com", "b@helpdesk.com", "c@helpdesk.com"] {
            seed_user(&svc, email, Role::Technician).await;
        }
        let first = svc.list_users().await.unwrap();
        let second = svc.list_users().await.unwrap();
        assert_eq!(first, second);
        let emails: Vec<_> = first.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a@helpdesk.com", "b@helpdesk.com", "c@helpdesk.com"]);
        assert_eq!(svc.count_users().await.unwrap(), 3);
    }
}
