//! Audit Recorder and audit log queries.
//!
//! Entries are append-only (the schema rejects UPDATE and DELETE). Recording
//! is best effort: a missing actor or a failed insert is logged, never
//! returned to the caller, so auditing cannot fail a mutation that already
//! happened.

use hd_core::entities::AuditLogEntry;
use hd_core::enums::{AuditAction, AuditEntity};
use hd_core::identity::Actor;
use hd_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::HelpdeskService;

const SELECT_COLS: &str = "id, user_id, action, entity, entity_id, details, created_at";

/// Filter criteria for audit queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity: Option<AuditEntity>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub user_id: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_entry(row: &libsql::Row) -> Result<AuditLogEntry, DatabaseError> {
    Ok(AuditLogEntry {
        id: row.get(0)?,
        user_id: get_opt_string(row, 1)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        entity: parse_enum(&row.get::<String>(3)?)?,
        entity_id: get_opt_string(row, 4)?,
        details: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl HelpdeskService {
    /// Record one audit entry for a completed mutation.
    ///
    /// Returns the stored entry, or `None` when it was skipped (no actor) or
    /// the append failed. Neither case is an error for the caller.
    pub async fn record_audit(
        &self,
        actor: Option<&Actor>,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<&str>,
        details: &str,
    ) -> Option<AuditLogEntry> {
        let Some(actor) = actor else {
            tracing::warn!(
                %action,
                %entity,
                entity_id,
                "no authenticated actor; audit entry skipped"
            );
            return None;
        };

        match self
            .append_audit(&actor.user_id, action, entity, entity_id, details)
            .await
        {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::error!(
                    %action,
                    %entity,
                    entity_id,
                    error = %e,
                    "audit append failed; mutation kept"
                );
                None
            }
        }
    }

    /// Insert an audit row and read it back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(
        &self,
        user_id: &str,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<&str>,
        details: &str,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.db()
            .execute_with(
                "INSERT INTO audit_logs (id, user_id, action, entity, entity_id, details)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                || {
                    libsql::params![
                        id.as_str(),
                        user_id,
                        action.as_str(),
                        entity.as_str(),
                        entity_id,
                        details
                    ]
                },
            )
            .await?;
        self.get_audit_log(&id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_audit_log(&self, id: &str) -> Result<Option<AuditLogEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM audit_logs WHERE id = ?1"),
                || [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Audit entries matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_audit_logs(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(entity) = filter.entity {
            params.push(entity.as_str().into());
            conditions.push(format!("entity = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(eid.clone().into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref uid) = filter.user_id {
            params.push(uid.clone().into());
            conditions.push(format!("user_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_clause = filter
            .limit
            .map_or_else(String::new, |limit| format!("LIMIT {limit}"));

        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_logs {where_clause}
             ORDER BY created_at DESC, rowid DESC {limit_clause}"
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
