//! The authorization-gated desk.
//!
//! Every method takes the acting identity and runs in the same order:
//! matrix check, then caller pre-checks, then the store. A rejected action
//! never reaches the store.

use hd_core::access::{self, Action};
use hd_core::entities::{AuditLogEntry, Client, NewClient, NewTicket, NewUser, Ticket, User, validate_state_code};
use hd_core::enums::{AuditEntity, Page, Role};
use hd_core::identity::Actor;
use hd_core::reports::{DashboardStats, ReportFilter, TicketReport, technician_roster};
use hd_core::settings::{PrintHeaderPatch, PrintHeaderSettings};
use hd_db::AuditFilter;
use hd_db::HelpdeskStore;
use hd_db::updates::client::ClientUpdate;
use hd_db::updates::ticket::TicketUpdate;
use hd_db::updates::user::UserUpdate;
use hd_local::SettingsStore;
use serde::Serialize;
use std::path::Path;

use crate::error::DeskError;

/// The record an audit entry points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entity", content = "record")]
pub enum AuditSubject {
    User(User),
    Client(Client),
    Ticket(Ticket),
}

pub struct Desk<S> {
    store: S,
}

fn non_blank(field: &str, value: Option<&String>) -> Result<(), DeskError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(DeskError::Invalid(format!("{field} is required"))),
        _ => Ok(()),
    }
}

impl<S: HelpdeskStore> Desk<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    // -- navigation --------------------------------------------------------

    #[must_use]
    pub const fn navigation(actor: &Actor) -> &'static [Page] {
        access::visible_pages(actor.role)
    }

    #[must_use]
    pub const fn assignable_roles(actor: &Actor) -> &'static [Role] {
        access::assignable_roles(actor.role)
    }

    // -- tickets -----------------------------------------------------------

    /// # Errors
    ///
    /// `Store` if the store call fails.
    pub async fn list_tickets(&self, actor: &Actor) -> Result<Vec<Ticket>, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Tickets))?;
        Ok(self.store.list_tickets().await?)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_ticket(&self, actor: &Actor, id: &str) -> Result<Ticket, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Tickets))?;
        self.store
            .get_ticket(id)
            .await?
            .ok_or_else(|| DeskError::not_found("Ticket", id))
    }

    /// Open a ticket. A missing or blank location is filled from the client
    /// as `"<city>, <state>"`.
    ///
    /// # Errors
    ///
    /// `Invalid` for a missing title, description, or client; `NotFound` when
    /// the client does not exist.
    pub async fn create_ticket(&self, actor: &Actor, input: NewTicket) -> Result<Ticket, DeskError> {
        access::authorize(actor.role, Action::CreateTicket)?;
        input.validate()?;
        let client = self
            .store
            .get_client(&input.client_id)
            .await?
            .ok_or_else(|| DeskError::not_found("Client", &input.client_id))?;
        let input = input.fill_location(&client);
        Ok(self.store.create_ticket(Some(actor), input).await?)
    }

    /// # Errors
    ///
    /// `Invalid` when a required field is blanked; `NotFound` for an unknown
    /// ticket, or for an unknown client when the move needs its location.
    ///
    /// Moving a ticket to another client without naming a location takes the
    /// new client's `"<city>, <state>"`, as creation does.
    pub async fn update_ticket(
        &self,
        actor: &Actor,
        id: &str,
        mut update: TicketUpdate,
    ) -> Result<Ticket, DeskError> {
        access::authorize(actor.role, Action::EditTicket)?;
        non_blank("title", update.title.as_ref())?;
        non_blank("description", update.description.as_ref())?;
        non_blank("client_id", update.client_id.as_ref())?;
        if let Some(ref client_id) = update.client_id
            && update.location.as_deref().is_none_or(|l| l.trim().is_empty())
        {
            let client = self
                .store
                .get_client(client_id)
                .await?
                .ok_or_else(|| DeskError::not_found("Client", client_id))?;
            update.location = Some(Ticket::default_location(&client));
        }
        non_blank("location", update.location.as_ref())?;
        Ok(self.store.update_ticket(Some(actor), id, update).await?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` for technicians; `NotFound` for an unknown id.
    pub async fn delete_ticket(&self, actor: &Actor, id: &str) -> Result<(), DeskError> {
        access::authorize(actor.role, Action::DeleteTicket)?;
        if self.store.delete_ticket(Some(actor), id).await? {
            Ok(())
        } else {
            Err(DeskError::not_found("Ticket", id))
        }
    }

    // -- clients -----------------------------------------------------------

    /// # Errors
    ///
    /// `AuthorizationDenied` for roles without the Clients page.
    pub async fn list_clients(&self, actor: &Actor) -> Result<Vec<Client>, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Clients))?;
        Ok(self.store.list_clients().await?)
    }

    /// Single client lookup. Open to every role since ticket screens show the
    /// client.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_client(&self, _actor: &Actor, id: &str) -> Result<Client, DeskError> {
        self.store
            .get_client(id)
            .await?
            .ok_or_else(|| DeskError::not_found("Client", id))
    }

    /// # Errors
    ///
    /// `Invalid` for a missing required field or malformed state code.
    pub async fn create_client(&self, actor: &Actor, input: NewClient) -> Result<Client, DeskError> {
        access::authorize(actor.role, Action::ManageClients)?;
        input.validate()?;
        Ok(self.store.create_client(Some(actor), input).await?)
    }

    /// # Errors
    ///
    /// `Invalid` when a required field is blanked or the state code is
    /// malformed; `NotFound` for an unknown id.
    pub async fn update_client(
        &self,
        actor: &Actor,
        id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DeskError> {
        access::authorize(actor.role, Action::ManageClients)?;
        non_blank("name", update.name.as_ref())?;
        non_blank("contact_person", update.contact_person.as_ref())?;
        non_blank("email", update.email.as_ref())?;
        non_blank("phone", update.phone.as_ref())?;
        non_blank("city", update.city.as_ref())?;
        if let Some(ref state) = update.state {
            validate_state_code(state)?;
        }
        Ok(self.store.update_client(Some(actor), id, update).await?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` for technicians; `NotFound` for an unknown id;
    /// `Store` when tickets still reference the client.
    pub async fn delete_client(&self, actor: &Actor, id: &str) -> Result<(), DeskError> {
        access::authorize(actor.role, Action::DeleteClient)?;
        if self.store.delete_client(Some(actor), id).await? {
            Ok(())
        } else {
            Err(DeskError::not_found("Client", id))
        }
    }

    // -- users -------------------------------------------------------------

    /// # Errors
    ///
    /// `AuthorizationDenied` for roles without the Users page.
    pub async fn list_users(&self, actor: &Actor) -> Result<Vec<User>, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Users))?;
        Ok(self.store.list_users().await?)
    }

    /// Users that can be assigned to tickets. Open to every role.
    ///
    /// # Errors
    ///
    /// `Store` if the store call fails.
    pub async fn technicians(&self, _actor: &Actor) -> Result<Vec<User>, DeskError> {
        let users = self.store.list_users().await?;
        Ok(technician_roster(&users).into_iter().cloned().collect())
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` when the actor cannot manage users or cannot
    /// assign the requested role; `Invalid` for missing fields.
    pub async fn create_user(&self, actor: &Actor, input: NewUser) -> Result<User, DeskError> {
        access::authorize(actor.role, Action::ManageUsers)?;
        access::authorize_role_assignment(actor.role, input.role)?;
        input.validate()?;
        Ok(self.store.create_user(Some(actor), input).await?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` when the target's current role or the new role
    /// is outside what the actor may assign; `NotFound` for an unknown id.
    pub async fn update_user(
        &self,
        actor: &Actor,
        id: &str,
        update: UserUpdate,
    ) -> Result<User, DeskError> {
        access::authorize(actor.role, Action::ManageUsers)?;
        if let Some(role) = update.role {
            access::authorize_role_assignment(actor.role, role)?;
        }
        non_blank("name", update.name.as_ref())?;
        non_blank("email", update.email.as_ref())?;
        if update.email.as_ref().is_some_and(|e| !e.contains('@')) {
            return Err(DeskError::Invalid("email is not a valid address".into()));
        }

        let target = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| DeskError::not_found("User", id))?;
        access::authorize_role_assignment(actor.role, target.role)?;

        Ok(self.store.update_user(Some(actor), id, update).await?)
    }

    /// # Errors
    ///
    /// `Invalid` when deleting oneself; `AuthorizationDenied` when the
    /// target's role is outside what the actor may assign; `NotFound` for an
    /// unknown id.
    pub async fn delete_user(&self, actor: &Actor, id: &str) -> Result<(), DeskError> {
        access::authorize(actor.role, Action::ManageUsers)?;
        if id == actor.user_id {
            return Err(DeskError::Invalid("you cannot delete your own account".into()));
        }

        let target = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| DeskError::not_found("User", id))?;
        access::authorize_role_assignment(actor.role, target.role)?;

        if self.store.delete_user(Some(actor), id).await? {
            Ok(())
        } else {
            Err(DeskError::not_found("User", id))
        }
    }

    // -- audit -------------------------------------------------------------

    /// # Errors
    ///
    /// `AuthorizationDenied` for everyone but admins.
    pub async fn list_audit_logs(
        &self,
        actor: &Actor,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, DeskError> {
        access::authorize(actor.role, Action::ViewAudit)?;
        Ok(self.store.list_audit_logs(filter).await?)
    }

    /// Resolve the record an audit entry refers to.
    ///
    /// # Errors
    ///
    /// `NotFound` when the entry is unknown, carries no entity id, or its
    /// record has since been deleted.
    pub async fn audit_subject(
        &self,
        actor: &Actor,
        entry_id: &str,
    ) -> Result<(AuditLogEntry, AuditSubject), DeskError> {
        access::authorize(actor.role, Action::ViewAudit)?;
        let entry = self
            .store
            .get_audit_log(entry_id)
            .await?
            .ok_or_else(|| DeskError::not_found("Audit entry", entry_id))?;
        let entity = entry.entity.as_str();
        let Some(ref target) = entry.entity_id else {
            return Err(DeskError::not_found(entity, "(none)"));
        };

        let subject = match entry.entity {
            AuditEntity::User => self.store.get_user(target).await?.map(AuditSubject::User),
            AuditEntity::Client => self.store.get_client(target).await?.map(AuditSubject::Client),
            AuditEntity::Ticket => self.store.get_ticket(target).await?.map(AuditSubject::Ticket),
        }
        .ok_or_else(|| DeskError::not_found(entity, target))?;

        Ok((entry, subject))
    }

    // -- dashboard and reports ---------------------------------------------

    /// # Errors
    ///
    /// `Store` if the store call fails.
    pub async fn dashboard(&self, actor: &Actor) -> Result<DashboardStats, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Dashboard))?;
        let tickets = self.store.list_tickets().await?;
        Ok(DashboardStats::from_tickets(&tickets))
    }

    /// # Errors
    ///
    /// `Invalid` when the date range is inverted.
    pub async fn ticket_report(
        &self,
        actor: &Actor,
        filter: ReportFilter,
    ) -> Result<TicketReport, DeskError> {
        access::authorize(actor.role, Action::ViewPage(Page::Reports))?;
        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(DeskError::Invalid(format!(
                "report range starts after it ends ({from} > {to})"
            )));
        }
        let tickets = self.store.list_tickets().await?;
        Ok(TicketReport::build(filter, &tickets))
    }

    // -- print settings ------------------------------------------------------

    /// Read by every role: printed work orders and reports carry the header.
    ///
    /// # Errors
    ///
    /// `Local` if the settings file cannot be read.
    pub fn print_settings(
        &self,
        _actor: &Actor,
        settings: &SettingsStore,
    ) -> Result<PrintHeaderSettings, DeskError> {
        Ok(settings.load()?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` for roles without the Settings page.
    pub fn update_print_settings(
        &self,
        actor: &Actor,
        settings: &SettingsStore,
        patch: PrintHeaderPatch,
    ) -> Result<PrintHeaderSettings, DeskError> {
        access::authorize(actor.role, Action::EditSettings)?;
        Ok(settings.update(patch)?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` for roles without the Settings page; `Local` for
    /// an oversized or unsupported image.
    pub fn set_logo(
        &self,
        actor: &Actor,
        settings: &SettingsStore,
        path: &Path,
    ) -> Result<PrintHeaderSettings, DeskError> {
        access::authorize(actor.role, Action::EditSettings)?;
        Ok(settings.set_logo_from_file(path)?)
    }

    /// # Errors
    ///
    /// `AuthorizationDenied` for roles without the Settings page.
    pub fn clear_logo(
        &self,
        actor: &Actor,
        settings: &SettingsStore,
    ) -> Result<PrintHeaderSettings, DeskError> {
        access::authorize(actor.role, Action::EditSettings)?;
        Ok(settings.clear_logo()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hd_db::HelpdeskService;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn desk() -> Desk<HelpdeskService> {
        Desk::new(HelpdeskService::new_local(":memory:").await.unwrap())
    }

    #[rstest]
    #[case(Role::Admin, 7)]
    #[case(Role::ManagerAdmin, 5)]
    #[case(Role::Manager, 4)]
    #[case(Role::Technician, 3)]
    fn navigation_and_assignable_roles(#[case] role: Role, #[case] pages: usize) {
        let actor = Actor::new("usr-x", role);
        assert_eq!(Desk::<HelpdeskService>::navigation(&actor).len(), pages);
        assert!(
            Desk::<HelpdeskService>::assignable_roles(&actor)
                .iter()
                .all(|r| !r.outranks(role))
        );
    }

    #[tokio::test]
    async fn blank_title_rejected_before_store() {
        let desk = desk().await;
        let admin = Actor::new("usr-a", Role::Admin);
        let update = hd_db::updates::ticket::TicketUpdateBuilder::new()
            .title("   ")
            .build();
        let err = desk.update_ticket(&admin, "tkt-x", update).await.unwrap_err();
        assert!(matches!(err, DeskError::Invalid(_)));
    }

    #[tokio::test]
    async fn inverted_report_range_rejected() {
        let desk = desk().await;
        let admin = Actor::new("usr-a", Role::Admin);
        let filter = ReportFilter {
            from: chrono::NaiveDate::from_ymd_opt(2024, 5, 2),
            to: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
            ..ReportFilter::default()
        };
        let err = desk.ticket_report(&admin, filter).await.unwrap_err();
        assert!(matches!(err, DeskError::Invalid(_)));
    }

    #[tokio::test]
    async fn missing_ticket_is_not_found() {
        let desk = desk().await;
        let admin = Actor::new("usr-a", Role::Admin);
        let err = desk.delete_ticket(&admin, "tkt-missing").await.unwrap_err();
        assert!(matches!(err, DeskError::NotFound { ref entity, .. } if entity == "Ticket"));
    }
}
