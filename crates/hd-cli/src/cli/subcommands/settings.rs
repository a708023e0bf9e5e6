use std::path::PathBuf;

use clap::Subcommand;

/// Print-header settings commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show the current header.
    Show,
    /// Change header text fields.
    Set {
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        cnpj: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Load a JPG, PNG, or GIF logo (2 MiB max).
    Logo { path: PathBuf },
    /// Remove the logo.
    ClearLogo,
}
