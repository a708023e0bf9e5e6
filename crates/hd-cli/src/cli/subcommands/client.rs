use clap::{Args, Subcommand};

/// Client commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClientCommands {
    /// Register a client.
    Create(ClientCreateArgs),
    /// Change fields on a client.
    Update(ClientUpdateArgs),
    /// List clients, oldest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a client by ID.
    Get { id: String },
    /// Delete a client with no tickets.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct ClientCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub contact_person: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    /// Two-letter state code.
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub agency_number: Option<String>,
    #[arg(long)]
    pub agency_name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ClientUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long, conflicts_with = "clear_agency")]
    pub agency_number: Option<String>,
    #[arg(long, conflicts_with = "clear_agency")]
    pub agency_name: Option<String>,
    /// Remove agency number and name.
    #[arg(long)]
    pub clear_agency: bool,
}
