use hd_auth::AuditSubject;
use hd_core::entities::AuditLogEntry;
use hd_core::enums::AuditAction;
use hd_db::AuditFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::commands::shared::parse::{parse_entity, parse_enum};
use crate::context::AppContext;
use crate::output::{columns, output, output_rows};

#[derive(Serialize)]
struct AuditDetail {
    entry: AuditLogEntry,
    subject: AuditSubject,
}

/// Handle `hdk audit`.
pub async fn handle(
    action: AuditCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;

    match action {
        AuditCommands::List {
            entity,
            entity_id,
            action,
            user,
            limit,
        } => {
            let filter = AuditFilter {
                entity: entity.as_deref().map(parse_entity).transpose()?,
                entity_id,
                action: action
                    .as_deref()
                    .map(|raw| parse_enum::<AuditAction>(raw, "action"))
                    .transpose()?,
                user_id: user,
                limit: Some(limit.or(flags.limit).unwrap_or(ctx.config.general.default_limit)),
            };
            let entries = ctx.desk.list_audit_logs(&actor, &filter).await?;
            output_rows(&entries, flags.format, columns::AUDIT)
        }
        AuditCommands::Show { id } => {
            let (entry, subject) = ctx.desk.audit_subject(&actor, &id).await?;
            output(&AuditDetail { entry, subject }, flags.format)
        }
    }
}
