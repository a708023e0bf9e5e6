use chrono::NaiveDate;
use clap::Subcommand;

/// Dashboard and report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Ticket counts by status.
    Dashboard,
    /// Filtered ticket report with summary figures.
    Summary {
        /// First creation day, YYYY-MM-DD.
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last creation day (inclusive), YYYY-MM-DD.
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        technician: Option<String>,
        #[arg(long)]
        client: Option<String>,
    },
}
