use serde::Serialize;

use hd_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::commands::shared::prompt::password_or_stdin;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse<'a> {
    authenticated: bool,
    user: Option<&'a User>,
}

/// Handle `hdk auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => {
            let password = password_or_stdin(args.password.clone())?;
            let user = ctx
                .session
                .login(ctx.desk.store(), &args.email, &password)
                .await?;
            output(&user, flags.format)
        }
        AuthCommands::Logout => {
            ctx.session.logout()?;
            output(
                &WhoamiResponse {
                    authenticated: false,
                    user: None,
                },
                flags.format,
            )
        }
        AuthCommands::Whoami => {
            let user = ctx.session.current_user();
            output(
                &WhoamiResponse {
                    authenticated: user.is_some(),
                    user,
                },
                flags.format,
            )
        }
    }
}
