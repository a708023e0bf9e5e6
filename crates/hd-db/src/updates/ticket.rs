//! Ticket update builder. The ticket code is never updatable.

use hd_core::enums::{Priority, TicketStatus};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_defect: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_services: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_info: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under_warranty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_signature: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_signature: Option<Option<String>>,
}

#[derive(Default)]
pub struct TicketUpdateBuilder(TicketUpdate);

impl TicketUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TicketUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn found_defect(mut self, found_defect: Option<String>) -> Self {
        self.0.found_defect = Some(found_defect);
        self
    }

    #[must_use]
    pub fn executed_services(mut self, executed_services: Option<String>) -> Self {
        self.0.executed_services = Some(executed_services);
        self
    }

    #[must_use]
    pub fn technician_notes(mut self, technician_notes: Option<String>) -> Self {
        self.0.technician_notes = Some(technician_notes);
        self
    }

    #[must_use]
    pub fn client_notes(mut self, client_notes: Option<String>) -> Self {
        self.0.client_notes = Some(client_notes);
        self
    }

    #[must_use]
    pub fn equipment_info(mut self, equipment_info: Option<String>) -> Self {
        self.0.equipment_info = Some(equipment_info);
        self
    }

    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.0.client_id = Some(client_id.into());
        self
    }

    /// `None` unassigns the ticket.
    #[must_use]
    pub fn technician_id(mut self, technician_id: Option<String>) -> Self {
        self.0.technician_id = Some(technician_id);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TicketStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.0.location = Some(location.into());
        self
    }

    #[must_use]
    pub const fn under_warranty(mut self, value: bool) -> Self {
        self.0.under_warranty = Some(value);
        self
    }

    #[must_use]
    pub const fn working(mut self, value: bool) -> Self {
        self.0.working = Some(value);
        self
    }

    #[must_use]
    pub const fn service_completed(mut self, value: bool) -> Self {
        self.0.service_completed = Some(value);
        self
    }

    #[must_use]
    pub const fn verified_by_client(mut self, value: bool) -> Self {
        self.0.verified_by_client = Some(value);
        self
    }

    #[must_use]
    pub fn technician_signature(mut self, signature: Option<String>) -> Self {
        self.0.technician_signature = Some(signature);
        self
    }

    #[must_use]
    pub fn client_signature(mut self, signature: Option<String>) -> Self {
        self.0.client_signature = Some(signature);
        self
    }

    #[must_use]
    pub fn build(self) -> TicketUpdate {
        self.0
    }
}
