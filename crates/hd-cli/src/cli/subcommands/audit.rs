use clap::Subcommand;

/// Audit trail commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// List entries, newest first.
    List {
        /// user, client, or ticket.
        #[arg(long)]
        entity: Option<String>,
        #[arg(long)]
        entity_id: Option<String>,
        /// create, update, or delete.
        #[arg(long)]
        action: Option<String>,
        /// Acting user ID.
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show an entry and the record it refers to.
    Show { id: String },
}
