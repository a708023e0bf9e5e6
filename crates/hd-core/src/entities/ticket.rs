use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Client, require};
use crate::enums::{Priority, TicketStatus};
use crate::errors::CoreError;

/// A support ticket / work order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    /// Human-readable code assigned by the backing store (e.g. `HD-000042`). Immutable.
    pub code: String,
    pub title: String,
    /// Initial defect report.
    pub description: String,
    pub found_defect: Option<String>,
    pub executed_services: Option<String>,
    pub technician_notes: Option<String>,
    pub client_notes: Option<String>,
    pub equipment_info: Option<String>,
    pub client_id: String,
    /// `None` = unassigned.
    pub technician_id: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    pub location: String,
    pub under_warranty: bool,
    pub working: bool,
    pub service_completed: bool,
    pub verified_by_client: bool,
    pub technician_signature: Option<String>,
    pub client_signature: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Default location for a ticket opened for `client`: `"<city>, <state>"`.
    #[must_use]
    pub fn default_location(client: &Client) -> String {
        format!("{}, {}", client.city, client.state)
    }
}

/// Input for creating a ticket. The code, id, and timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub client_id: String,
    pub technician_id: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    /// `None` or blank → filled from the client by [`NewTicket::fill_location`].
    pub location: Option<String>,
    pub found_defect: Option<String>,
    pub executed_services: Option<String>,
    pub technician_notes: Option<String>,
    pub client_notes: Option<String>,
    pub equipment_info: Option<String>,
    pub under_warranty: bool,
    pub working: bool,
    pub service_completed: bool,
    pub verified_by_client: bool,
    pub technician_signature: Option<String>,
    pub client_signature: Option<String>,
}

impl NewTicket {
    /// A new open, medium-priority, unassigned ticket.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            client_id: client_id.into(),
            technician_id: None,
            status: TicketStatus::Open,
            priority: Priority::Medium,
            location: None,
            found_defect: None,
            executed_services: None,
            technician_notes: None,
            client_notes: None,
            equipment_info: None,
            under_warranty: false,
            working: false,
            service_completed: false,
            verified_by_client: false,
            technician_signature: None,
            client_signature: None,
        }
    }

    /// Required-field pre-check: title, description, client.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("client_id", &self.client_id)
    }

    /// Apply the default-fill convention: a missing or blank location becomes
    /// the client's `"<city>, <state>"`. An explicit location is kept.
    #[must_use]
    pub fn fill_location(mut self, client: &Client) -> Self {
        let blank = self.location.as_deref().is_none_or(|l| l.trim().is_empty());
        if blank {
            self.location = Some(Ticket::default_location(client));
        }
        self
    }
}
