use hd_core::settings::PrintHeaderPatch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SettingsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hdk settings`. Reads and writes the local settings file only.
pub fn handle(action: SettingsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;
    let desk = &ctx.desk;

    let settings = match action {
        SettingsCommands::Show => desk.print_settings(&actor, &ctx.settings)?,
        SettingsCommands::Set {
            company_name,
            cnpj,
            phone,
            address,
        } => {
            let patch = PrintHeaderPatch {
                company_name,
                cnpj,
                phone,
                address,
            };
            if patch.is_empty() {
                anyhow::bail!(
                    "At least one of --company-name, --cnpj, --phone, or --address must be provided"
                );
            }
            desk.update_print_settings(&actor, &ctx.settings, patch)?
        }
        SettingsCommands::Logo { path } => desk.set_logo(&actor, &ctx.settings, &path)?,
        SettingsCommands::ClearLogo => desk.clear_logo(&actor, &ctx.settings)?,
    };
    output(&settings, flags.format)
}
