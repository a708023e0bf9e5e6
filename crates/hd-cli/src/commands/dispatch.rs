use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Nav => commands::nav::handle(ctx, flags),
        Commands::Ticket { action } => commands::ticket::handle(action, ctx, flags).await,
        Commands::Client { action } => commands::client::handle(action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(action, ctx, flags).await,
        Commands::Audit { action } => commands::audit::handle(action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(action, ctx, flags).await,
        Commands::Settings { action } => commands::settings::handle(action, ctx, flags),
        Commands::BootstrapAdmin(args) => commands::bootstrap::handle(args, ctx, flags).await,
    }
}
