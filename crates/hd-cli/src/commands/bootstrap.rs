use hd_core::entities::NewUser;
use hd_core::enums::Role;
use hd_db::HelpdeskStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BootstrapAdminArgs;
use crate::commands::shared::prompt::password_or_stdin;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hdk bootstrap-admin`.
///
/// Runs outside the desk: there is nobody to act as yet, so the store records
/// no audit entry for this user.
pub async fn handle(
    args: BootstrapAdminArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.desk.store();
    let existing = store.count_users().await?;
    if existing > 0 {
        anyhow::bail!("bootstrap-admin only runs on an empty store ({existing} users exist)");
    }

    let password = password_or_stdin(args.password)?;
    let input = NewUser::new(args.name, args.email, password, Role::Admin);
    input.validate()?;

    let admin = store.create_user(None, input).await?;
    tracing::info!(user_id = %admin.id, "first admin created");
    output(&admin, flags.format)
}
