use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, AuditEntity};

/// An append-only audit trail entry recording a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: String,
    /// Acting user; `None` only when a mutation ran with no authenticated actor.
    pub user_id: Option<String>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    /// `None` when the mutated record had no id.
    pub entity_id: Option<String>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
