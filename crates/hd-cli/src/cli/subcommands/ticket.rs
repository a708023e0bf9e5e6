use clap::{Args, Subcommand, ValueEnum};

/// Ticket commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// Open a ticket.
    Create(TicketCreateArgs),
    /// Change fields on a ticket.
    Update(TicketUpdateArgs),
    /// List tickets, newest first unless `--sort` says otherwise.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        technician: Option<String>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long, value_enum, default_value_t = TicketSort::Newest)]
        sort: TicketSort,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a ticket by ID.
    Get { id: String },
    /// Delete a ticket.
    Delete { id: String },
}

/// Row order for `ticket list`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum TicketSort {
    #[default]
    Newest,
    Oldest,
    /// Most urgent first; newest first within a priority.
    Priority,
}

#[derive(Clone, Debug, Args)]
pub struct TicketCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Client ID.
    #[arg(long)]
    pub client: String,
    /// Technician user ID.
    #[arg(long)]
    pub technician: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Defaults to the client's "<city>, <state>".
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub equipment_info: Option<String>,
    #[arg(long)]
    pub found_defect: Option<String>,
    #[arg(long)]
    pub under_warranty: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TicketUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long, conflicts_with = "unassign")]
    pub technician: Option<String>,
    /// Remove the assigned technician.
    #[arg(long)]
    pub unassign: bool,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub found_defect: Option<String>,
    #[arg(long)]
    pub executed_services: Option<String>,
    #[arg(long)]
    pub technician_notes: Option<String>,
    #[arg(long)]
    pub client_notes: Option<String>,
    #[arg(long)]
    pub equipment_info: Option<String>,
    #[arg(long)]
    pub under_warranty: Option<bool>,
    #[arg(long)]
    pub working: Option<bool>,
    #[arg(long)]
    pub service_completed: Option<bool>,
    #[arg(long)]
    pub verified_by_client: Option<bool>,
    #[arg(long)]
    pub technician_signature: Option<String>,
    #[arg(long)]
    pub client_signature: Option<String>,
}
