use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user with one of the roles you may assign.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, manager_admin, manager, or technician.
        #[arg(long)]
        role: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Change name, email, or role.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// List users, oldest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Users that tickets can be assigned to.
    Technicians,
    /// Delete a user. Their tickets become unassigned.
    Delete { id: String },
}
