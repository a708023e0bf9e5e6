//! Client repository: CRUD.

use hd_core::entities::{Client, NewClient};
use hd_core::enums::{AuditAction, AuditEntity};
use hd_core::identity::Actor;
use hd_core::ids::PREFIX_CLIENT;

use crate::error::DatabaseError;
use crate::helpers::{SetClauses, get_opt_string, opt_value, parse_datetime};
use crate::service::HelpdeskService;
use crate::updates::client::ClientUpdate;

const SELECT_COLS: &str = "id, name, contact_person, email, phone, address, city, state, \
                           agency_number, agency_name, created_at";

fn row_to_client(row: &libsql::Row) -> Result<Client, DatabaseError> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        contact_person: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        city: row.get(6)?,
        state: row.get(7)?,
        agency_number: get_opt_string(row, 8)?,
        agency_name: get_opt_string(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl HelpdeskService {
    /// All clients, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` when the store cannot be reached.
    pub async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM clients ORDER BY created_at, rowid"),
                || (),
            )
            .await?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next().await? {
            clients.push(row_to_client(&row)?);
        }
        Ok(clients)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_client(&self, id: &str) -> Result<Option<Client>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM clients WHERE id = ?1"),
                || [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::ValidationRejected` when the store rejects the
    /// row (blank name, state not two characters).
    pub async fn create_client(
        &self,
        actor: Option<&Actor>,
        input: NewClient,
    ) -> Result<Client, DatabaseError> {
        let input = input.normalized();
        let id = self.db().generate_id(PREFIX_CLIENT).await?;

        self.db()
            .execute_with(
                "INSERT INTO clients (id, name, contact_person, email, phone, address, city, state, agency_number, agency_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.name.as_str(),
                        input.contact_person.as_str(),
                        input.email.as_str(),
                        input.phone.as_str(),
                        input.address.as_str(),
                        input.city.as_str(),
                        input.state.as_str(),
                        input.agency_number.as_deref(),
                        input.agency_name.as_deref()
                    ]
                },
            )
            .await?;

        let client = self
            .get_client(&id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Client", &id))?;

        self.record_audit(
            actor,
            AuditAction::Create,
            AuditEntity::Client,
            Some(&client.id),
            &AuditEntity::Client.summary(&client.name, AuditAction::Create),
        )
        .await;

        Ok(client)
    }

    /// Apply a partial update. An empty patch returns the current client
    /// without writing or auditing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no client has this id.
    pub async fn update_client(
        &self,
        actor: Option<&Actor>,
        client_id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.clone());
        }
        if let Some(ref contact_person) = update.contact_person {
            sets.push("contact_person", contact_person.clone());
        }
        if let Some(ref email) = update.email {
            sets.push("email", email.clone());
        }
        if let Some(ref phone) = update.phone {
            sets.push("phone", phone.clone());
        }
        if let Some(ref address) = update.address {
            sets.push("address", address.clone());
        }
        if let Some(ref city) = update.city {
            sets.push("city", city.clone());
        }
        if let Some(ref state) = update.state {
            sets.push("state", state.trim().to_uppercase());
        }
        // Blank agency fields are stored as NULL, as on create.
        if let Some(ref agency_number) = update.agency_number {
            sets.push("agency_number", opt_value(non_blank(agency_number.as_deref())));
        }
        if let Some(ref agency_name) = update.agency_name {
            sets.push("agency_name", opt_value(non_blank(agency_name.as_deref())));
        }

        if sets.is_empty() {
            return self
                .get_client(client_id)
                .await?
                .ok_or_else(|| DatabaseError::not_found("Client", client_id));
        }

        let (sql, params) = sets.into_update("clients", client_id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("Client", client_id));
        }

        let updated = self
            .get_client(client_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Client", client_id))?;

        self.record_audit(
            actor,
            AuditAction::Update,
            AuditEntity::Client,
            Some(client_id),
            &AuditEntity::Client.summary(&updated.name, AuditAction::Update),
        )
        .await;

        Ok(updated)
    }

    /// Hard delete. Returns `false` (and audits nothing) when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ValidationRejected` while tickets still
    /// reference the client.
    pub async fn delete_client(
        &self,
        actor: Option<&Actor>,
        client_id: &str,
    ) -> Result<bool, DatabaseError> {
        let Some(existing) = self.get_client(client_id).await? else {
            return Ok(false);
        };

        let deleted = self
            .db()
            .execute_with("DELETE FROM clients WHERE id = ?1", || [client_id])
            .await?;
        if deleted == 0 {
            return Ok(false);
        }

        self.record_audit(
            actor,
            AuditAction::Delete,
            AuditEntity::Client,
            Some(client_id),
            &AuditEntity::Client.summary(&existing.name, AuditAction::Delete),
        )
        .await;

        Ok(true)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
