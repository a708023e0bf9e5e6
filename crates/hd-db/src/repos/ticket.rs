//! Ticket repository: CRUD. The store assigns `code` on insert and refreshes
//! `updated_at` on every update.

use hd_core::entities::{NewTicket, Ticket};
use hd_core::enums::{AuditAction, AuditEntity};
use hd_core::identity::Actor;
use hd_core::ids::PREFIX_TICKET;

use crate::error::DatabaseError;
use crate::helpers::{SQL_NOW, SetClauses, get_bool, get_opt_string, opt_value, parse_datetime, parse_enum};
use crate::service::HelpdeskService;
use crate::updates::ticket::TicketUpdate;

const SELECT_COLS: &str = "id, code, title, description, found_defect, executed_services, \
                           technician_notes, client_notes, equipment_info, client_id, technician_id, \
                           status, priority, location, under_warranty, working, service_completed, \
                           verified_by_client, technician_signature, client_signature, created_at, updated_at";

fn row_to_ticket(row: &libsql::Row) -> Result<Ticket, DatabaseError> {
    Ok(Ticket {
        id: row.get(0)?,
        code: get_opt_string(row, 1)?.ok_or_else(|| {
            DatabaseError::InvalidState("ticket row has no code assigned".into())
        })?,
        title: row.get(2)?,
        description: row.get(3)?,
        found_defect: get_opt_string(row, 4)?,
        executed_services: get_opt_string(row, 5)?,
        technician_notes: get_opt_string(row, 6)?,
        client_notes: get_opt_string(row, 7)?,
        equipment_info: get_opt_string(row, 8)?,
        client_id: row.get(9)?,
        technician_id: get_opt_string(row, 10)?,
        status: parse_enum(&row.get::<String>(11)?)?,
        priority: parse_enum(&row.get::<String>(12)?)?,
        location: row.get(13)?,
        under_warranty: get_bool(row, 14)?,
        working: get_bool(row, 15)?,
        service_completed: get_bool(row, 16)?,
        verified_by_client: get_bool(row, 17)?,
        technician_signature: get_opt_string(row, 18)?,
        client_signature: get_opt_string(row, 19)?,
        created_at: parse_datetime(&row.get::<String>(20)?)?,
        updated_at: parse_datetime(&row.get::<String>(21)?)?,
    })
}

impl HelpdeskService {
    /// All tickets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` when the store cannot be reached.
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM tickets ORDER BY created_at DESC, rowid DESC"),
                || (),
            )
            .await?;
        let mut tickets = Vec::new();
        while let Some(row) = rows.next().await? {
            tickets.push(row_to_ticket(&row)?);
        }
        Ok(tickets)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM tickets WHERE id = ?1"),
                || [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_ticket(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert a ticket. The store assigns id, code, and both timestamps.
    ///
    /// `input.location` is stored as given; callers apply
    /// [`NewTicket::fill_location`] first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ValidationRejected` when the client or
    /// technician does not exist.
    pub async fn create_ticket(
        &self,
        actor: Option<&Actor>,
        input: NewTicket,
    ) -> Result<Ticket, DatabaseError> {
        let id = self.db().generate_id(PREFIX_TICKET).await?;
        let location = input.location.clone().unwrap_or_default();

        self.db()
            .execute_with(
                "INSERT INTO tickets (id, title, description, found_defect, executed_services,
                     technician_notes, client_notes, equipment_info, client_id, technician_id,
                     status, priority, location, under_warranty, working, service_completed,
                     verified_by_client, technician_signature, client_signature)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.title.as_str(),
                        input.description.as_str(),
                        input.found_defect.as_deref(),
                        input.executed_services.as_deref(),
                        input.technician_notes.as_deref(),
                        input.client_notes.as_deref(),
                        input.equipment_info.as_deref(),
                        input.client_id.as_str(),
                        input.technician_id.as_deref(),
                        input.status.as_str(),
                        input.priority.as_str(),
                        location.as_str(),
                        i64::from(input.under_warranty),
                        i64::from(input.working),
                        i64::from(input.service_completed),
                        i64::from(input.verified_by_client),
                        input.technician_signature.as_deref(),
                        input.client_signature.as_deref()
                    ]
                },
            )
            .await?;

        let ticket = self
            .get_ticket(&id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Ticket", &id))?;

        self.record_audit(
            actor,
            AuditAction::Create,
            AuditEntity::Ticket,
            Some(&ticket.id),
            &AuditEntity::Ticket.summary(&ticket.title, AuditAction::Create),
        )
        .await;

        Ok(ticket)
    }

    /// Apply a partial update and refresh `updated_at`. An empty patch
    /// returns the current ticket without writing or auditing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no ticket has this id.
    pub async fn update_ticket(
        &self,
        actor: Option<&Actor>,
        ticket_id: &str,
        update: TicketUpdate,
    ) -> Result<Ticket, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref title) = update.title {
            sets.push("title", title.clone());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.clone());
        }
        for (column, value) in [
            ("found_defect", &update.found_defect),
            ("executed_services", &update.executed_services),
            ("technician_notes", &update.technician_notes),
            ("client_notes", &update.client_notes),
            ("equipment_info", &update.equipment_info),
            ("technician_id", &update.technician_id),
            ("technician_signature", &update.technician_signature),
            ("client_signature", &update.client_signature),
        ] {
            if let Some(value) = value {
                sets.push(column, opt_value(value.as_deref()));
            }
        }
        if let Some(ref client_id) = update.client_id {
            sets.push("client_id", client_id.clone());
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }
        if let Some(priority) = update.priority {
            sets.push("priority", priority.as_str());
        }
        if let Some(ref location) = update.location {
            sets.push("location", location.clone());
        }
        for (column, value) in [
            ("under_warranty", update.under_warranty),
            ("working", update.working),
            ("service_completed", update.service_completed),
            ("verified_by_client", update.verified_by_client),
        ] {
            if let Some(value) = value {
                sets.push(column, i64::from(value));
            }
        }

        if sets.is_empty() {
            return self
                .get_ticket(ticket_id)
                .await?
                .ok_or_else(|| DatabaseError::not_found("Ticket", ticket_id));
        }
        sets.push_raw("updated_at", SQL_NOW);

        let (sql, params) = sets.into_update("tickets", ticket_id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("Ticket", ticket_id));
        }

        let updated = self
            .get_ticket(ticket_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Ticket", ticket_id))?;

        self.record_audit(
            actor,
            AuditAction::Update,
            AuditEntity::Ticket,
            Some(ticket_id),
            &AuditEntity::Ticket.summary(&updated.title, AuditAction::Update),
        )
        .await;

        Ok(updated)
    }

    /// Hard delete. Returns `false` (and audits nothing) when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn delete_ticket(
        &self,
        actor: Option<&Actor>,
        ticket_id: &str,
    ) -> Result<bool, DatabaseError> {
        let Some(existing) = self.get_ticket(ticket_id).await? else {
            return Ok(false);
        };

        let deleted = self
            .db()
            .execute_with("DELETE FROM tickets WHERE id = ?1", || [ticket_id])
            .await?;
        if deleted == 0 {
            return Ok(false);
        }

        self.record_audit(
            actor,
            AuditAction::Delete,
            AuditEntity::Ticket,
            Some(ticket_id),
            &AuditEntity::Ticket.summary(&existing.title, AuditAction::Delete),
        )
        .await;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::AuditFilter;
    use crate::error::DatabaseError;
    use crate::test_support::{admin_actor, sample_ticket, seed_client, seed_user, test_service};
    use crate::updates::ticket::TicketUpdateBuilder;
    use hd_core::entities::NewTicket;
    use hd_core::enums::{AuditAction, Priority, Role, TicketStatus};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_assigns_code_and_equal_timestamps() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let created = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("Printer jam", &client))
            .await
            .unwrap();

        let fetched = svc.get_ticket(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.id.starts_with("tkt-"));
        assert!(fetched.code.starts_with("HD-"), "{}", fetched.code);
        assert_eq!(fetched.updated_at, fetched.created_at);
        assert_eq!(fetched.status, TicketStatus::Open);
        assert_eq!(fetched.priority, Priority::Medium);
        assert_eq!(fetched.location, "Rio de Janeiro, RJ");
    }

    #[tokio::test]
    async fn codes_are_unique_and_sequential() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let a = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("A", &client))
            .await
            .unwrap();
        let b = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("B", &client))
            .await
            .unwrap();
        assert_eq!(a.code, "HD-000001");
        assert_eq!(b.code, "HD-000002");
    }

    #[tokio::test]
    async fn code_cannot_be_changed() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let ticket = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("A", &client))
            .await
            .unwrap();
        let err = svc
            .db()
            .execute_with("UPDATE tickets SET code = 'HD-999999' WHERE id = ?1", || {
                [ticket.id.as_str()]
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ValidationRejected(_)), "{err}");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        for title in ["first", "second", "third"] {
            svc.create_ticket(Some(&admin_actor()), sample_ticket(title, &client))
                .await
                .unwrap();
        }
        let titles: Vec<_> = svc
            .list_tickets()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn update_bumps_updated_at_and_keeps_code() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let ticket = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("A", &client))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let updated = svc
            .update_ticket(
                Some(&admin_actor()),
                &ticket.id,
                TicketUpdateBuilder::new()
                    .status(TicketStatus::Closed)
                    .service_completed(true)
                    .technician_notes(Some("Replaced fuser".into()))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.code, ticket.code);
        assert_eq!(updated.created_at, ticket.created_at);
        assert!(updated.updated_at > ticket.updated_at);
        assert_eq!(updated.status, TicketStatus::Closed);
        assert!(updated.service_completed);
        assert_eq!(updated.technician_notes.as_deref(), Some("Replaced fuser"));

        let head = &svc.list_audit_logs(&AuditFilter::default()).await.unwrap()[0];
        assert_eq!(head.action, AuditAction::Update);
        assert_eq!(head.details, "Ticket 'A' updated.");
    }

    #[tokio::test]
    async fn unknown_client_rejected_by_store() {
        let svc = test_service().await;
        let err = svc
            .create_ticket(
                Some(&admin_actor()),
                NewTicket::new("A", "B", "cli-missing"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ValidationRejected(_)), "{err}");
    }

    #[tokio::test]
    async fn deleting_technician_unassigns_tickets() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let tech = seed_user(&svc, "tech@helpdesk.com", Role::Technician).await;
        let mut input = sample_ticket("A", &client);
        input.technician_id = Some(tech.id.clone());
        let ticket = svc.create_ticket(Some(&admin_actor()), input).await.unwrap();
        assert_eq!(ticket.technician_id.as_deref(), Some(tech.id.as_str()));

        svc.delete_user(Some(&admin_actor()), &tech.id).await.unwrap();
        let ticket = svc.get_ticket(&ticket.id).await.unwrap().unwrap();
        assert_eq!(ticket.technician_id, None);
    }

    #[tokio::test]
    async fn delete_ticket_then_missing() {
        let svc = test_service().await;
        let client = seed_client(&svc, "Acme").await;
        let ticket = svc
            .create_ticket(Some(&admin_actor()), sample_ticket("A", &client))
            .await
            .unwrap();
        assert!(svc.delete_ticket(Some(&admin_actor()), &ticket.id).await.unwrap());
        assert!(svc.get_ticket(&ticket.id).await.unwrap().is_none());
        assert!(!svc.delete_ticket(Some(&admin_actor()), &ticket.id).await.unwrap());
    }
}
