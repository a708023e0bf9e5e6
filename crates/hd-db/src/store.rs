//! The store seam the authorization gate is generic over.
//!
//! `HelpdeskService` is the production implementation; tests substitute
//! doubles (e.g. one that counts calls) to prove a rejected action never
//! reaches the store.

use async_trait::async_trait;
use hd_core::entities::{AuditLogEntry, Client, NewClient, NewTicket, NewUser, Ticket, User};
use hd_core::identity::Actor;

use crate::error::DatabaseError;
use crate::repos::audit::AuditFilter;
use crate::service::HelpdeskService;
use crate::updates::client::ClientUpdate;
use crate::updates::ticket::TicketUpdate;
use crate::updates::user::UserUpdate;

#[async_trait]
pub trait HelpdeskStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn count_users(&self) -> Result<u64, DatabaseError>;
    async fn create_user(&self, actor: Option<&Actor>, input: NewUser) -> Result<User, DatabaseError>;
    async fn update_user(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: UserUpdate,
    ) -> Result<User, DatabaseError>;
    async fn delete_user(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError>;
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError>;

    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError>;
    async fn get_client(&self, id: &str) -> Result<Option<Client>, DatabaseError>;
    async fn create_client(
        &self,
        actor: Option<&Actor>,
        input: NewClient,
    ) -> Result<Client, DatabaseError>;
    async fn update_client(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError>;
    async fn delete_client(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError>;
    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError>;
    async fn create_ticket(
        &self,
        actor: Option<&Actor>,
        input: NewTicket,
    ) -> Result<Ticket, DatabaseError>;
    async fn update_ticket(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: TicketUpdate,
    ) -> Result<Ticket, DatabaseError>;
    async fn delete_ticket(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError>;

    async fn list_audit_logs(&self, filter: &AuditFilter) -> Result<Vec<AuditLogEntry>, DatabaseError>;
    async fn get_audit_log(&self, id: &str) -> Result<Option<AuditLogEntry>, DatabaseError>;
}

#[async_trait]
impl HelpdeskStore for HelpdeskService {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Self::list_users(self).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        Self::get_user(self, id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Self::get_user_by_email(self, email).await
    }

    async fn count_users(&self) -> Result<u64, DatabaseError> {
        Self::count_users(self).await
    }

    async fn create_user(&self, actor: Option<&Actor>, input: NewUser) -> Result<User, DatabaseError> {
        Self::create_user(self, actor, input).await
    }

    async fn update_user(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: UserUpdate,
    ) -> Result<User, DatabaseError> {
        Self::update_user(self, actor, id, update).await
    }

    async fn delete_user(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_user(self, actor, id).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        Self::authenticate(self, email, password).await
    }

    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        Self::list_clients(self).await
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>, DatabaseError> {
        Self::get_client(self, id).await
    }

    async fn create_client(
        &self,
        actor: Option<&Actor>,
        input: NewClient,
    ) -> Result<Client, DatabaseError> {
        Self::create_client(self, actor, input).await
    }

    async fn update_client(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError> {
        Self::update_client(self, actor, id, update).await
    }

    async fn delete_client(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_client(self, actor, id).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError> {
        Self::list_tickets(self).await
    }

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError> {
        Self::get_ticket(self, id).await
    }

    async fn create_ticket(
        &self,
        actor: Option<&Actor>,
        input: NewTicket,
    ) -> Result<Ticket, DatabaseError> {
        Self::create_ticket(self, actor, input).await
    }

    async fn update_ticket(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: TicketUpdate,
    ) -> Result<Ticket, DatabaseError> {
        Self::update_ticket(self, actor, id, update).await
    }

    async fn delete_ticket(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_ticket(self, actor, id).await
    }

    async fn list_audit_logs(&self, filter: &AuditFilter) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        Self::list_audit_logs(self, filter).await
    }

    async fn get_audit_log(&self, id: &str) -> Result<Option<AuditLogEntry>, DatabaseError> {
        Self::get_audit_log(self, id).await
    }
}
