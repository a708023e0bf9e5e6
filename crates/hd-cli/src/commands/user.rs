use hd_core::entities::NewUser;
use hd_core::enums::Role;
use hd_db::updates::user::UserUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::prompt::password_or_stdin;
use crate::context::AppContext;
use crate::output::{columns, output, output_rows};

/// Handle `hdk user`.
pub async fn handle(
    action: UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;

    match action {
        UserCommands::Create {
            name,
            email,
            role,
            password,
        } => {
            let role = parse_enum::<Role>(&role, "role")?;
            let password = password_or_stdin(password)?;
            let user = ctx
                .desk
                .create_user(&actor, NewUser::new(name, email, password, role))
                .await?;
            output(&user, flags.format)
        }
        UserCommands::Update {
            id,
            name,
            email,
            role,
        } => {
            let mut builder = UserUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(email) = email {
                builder = builder.email(email);
            }
            if let Some(raw) = role.as_deref() {
                builder = builder.role(parse_enum::<Role>(raw, "role")?);
            }
            let user = ctx.desk.update_user(&actor, &id, builder.build()).await?;
            output(&user, flags.format)
        }
        UserCommands::List { limit } => {
            let mut users = ctx.desk.list_users(&actor).await?;
            users.truncate(effective_limit(
                limit,
                flags.limit,
                ctx.config.general.default_limit,
            ));
            output_rows(&users, flags.format, columns::USER)
        }
        UserCommands::Technicians => {
            let technicians = ctx.desk.technicians(&actor).await?;
            output_rows(&technicians, flags.format, columns::USER)
        }
        UserCommands::Delete { id } => {
            ctx.desk.delete_user(&actor, &id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
