use clap::{Args, Subcommand};

use super::subcommands::{
    AuditCommands, AuthCommands, ClientCommands, ReportCommands, SettingsCommands,
    TicketCommands, UserCommands,
};

/// Root command tree. Each group mirrors one dashboard screen.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, or show who is signed in.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Pages and assignable roles for the signed-in user.
    Nav,
    /// Service tickets.
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Client organizations.
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Dashboard users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// The audit trail.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Dashboard counts and ticket reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Print-header settings for work orders and reports.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Create the first admin account on an empty store.
    BootstrapAdmin(BootstrapAdminArgs),
}

#[derive(Clone, Debug, Args)]
pub struct BootstrapAdminArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}
