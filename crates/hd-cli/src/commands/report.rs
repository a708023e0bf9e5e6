use hd_core::reports::ReportFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hdk report`.
pub async fn handle(
    action: ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;

    match action {
        ReportCommands::Dashboard => {
            let stats = ctx.desk.dashboard(&actor).await?;
            output(&stats, flags.format)
        }
        ReportCommands::Summary {
            from,
            to,
            technician,
            client,
        } => {
            let filter = ReportFilter {
                from,
                to,
                technician_id: technician,
                client_id: client,
            };
            let report = ctx.desk.ticket_report(&actor, filter).await?;
            output(&report, flags.format)
        }
    }
}
