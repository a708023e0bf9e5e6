pub mod audit;
pub mod auth;
pub mod client;
pub mod report;
pub mod settings;
pub mod ticket;
pub mod user;

pub use audit::AuditCommands;
pub use auth::AuthCommands;
pub use client::ClientCommands;
pub use report::ReportCommands;
pub use settings::SettingsCommands;
pub use ticket::TicketCommands;
pub use user::UserCommands;
