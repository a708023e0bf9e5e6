pub mod audit;
pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod dispatch;
pub mod nav;
pub mod report;
pub mod settings;
pub mod shared;
pub mod ticket;
pub mod user;
