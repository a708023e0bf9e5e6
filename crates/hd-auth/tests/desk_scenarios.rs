//! End-to-end flows through the session holder and the gated desk, against an
//! in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hd_auth::{AuditSubject, Desk, DeskError, SessionHolder};
use hd_core::entities::{AuditLogEntry, Client, NewClient, NewTicket, NewUser, Ticket, User};
use hd_core::enums::{AuditAction, AuditEntity, Role};
use hd_core::identity::Actor;
use hd_db::error::DatabaseError;
use hd_db::updates::client::{ClientUpdate, ClientUpdateBuilder};
use hd_db::updates::ticket::{TicketUpdate, TicketUpdateBuilder};
use hd_db::updates::user::{UserUpdate, UserUpdateBuilder};
use hd_db::{AuditFilter, HelpdeskService, HelpdeskStore};
use hd_local::{KeyedFileStore, SessionStore, SettingsStore};
use hd_core::settings::PrintHeaderPatch;
use pretty_assertions::assert_eq;

/// Wraps the real service and counts every call that reaches it.
struct CountingStore {
    inner: HelpdeskService,
    calls: AtomicUsize,
}

impl CountingStore {
    async fn new() -> Self {
        Self {
            inner: HelpdeskService::new_local(":memory:").await.unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HelpdeskStore for CountingStore {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.hit();
        self.inner.list_users().await
    }
    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        self.hit();
        HelpdeskStore::get_user(&self.inner, id).await
    }
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.hit();
        HelpdeskStore::get_user_by_email(&self.inner, email).await
    }
    async fn count_users(&self) -> Result<u64, DatabaseError> {
        self.hit();
        HelpdeskStore::count_users(&self.inner).await
    }
    async fn create_user(&self, actor: Option<&Actor>, input: NewUser) -> Result<User, DatabaseError> {
        self.hit();
        HelpdeskStore::create_user(&self.inner, actor, input).await
    }
    async fn update_user(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: UserUpdate,
    ) -> Result<User, DatabaseError> {
        self.hit();
        HelpdeskStore::update_user(&self.inner, actor, id, update).await
    }
    async fn delete_user(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        self.hit();
        HelpdeskStore::delete_user(&self.inner, actor, id).await
    }
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        self.hit();
        HelpdeskStore::authenticate(&self.inner, email, password).await
    }
    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        self.hit();
        HelpdeskStore::list_clients(&self.inner).await
    }
    async fn get_client(&self, id: &str) -> Result<Option<Client>, DatabaseError> {
        self.hit();
        HelpdeskStore::get_client(&self.inner, id).await
    }
    async fn create_client(
        &self,
        actor: Option<&Actor>,
        input: NewClient,
    ) -> Result<Client, DatabaseError> {
        self.hit();
        HelpdeskStore::create_client(&self.inner, actor, input).await
    }
    async fn update_client(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError> {
        self.hit();
        HelpdeskStore::update_client(&self.inner, actor, id, update).await
    }
    async fn delete_client(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        self.hit();
        HelpdeskStore::delete_client(&self.inner, actor, id).await
    }
    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError> {
        self.hit();
        HelpdeskStore::list_tickets(&self.inner).await
    }
    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError> {
        self.hit();
        HelpdeskStore::get_ticket(&self.inner, id).await
    }
    async fn create_ticket(
        &self,
        actor: Option<&Actor>,
        input: NewTicket,
    ) -> Result<Ticket, DatabaseError> {
        self.hit();
        HelpdeskStore::create_ticket(&self.inner, actor, input).await
    }
    async fn update_ticket(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: TicketUpdate,
    ) -> Result<Ticket, DatabaseError> {
        self.hit();
        HelpdeskStore::update_ticket(&self.inner, actor, id, update).await
    }
    async fn delete_ticket(&self, actor: Option<&Actor>, id: &str) -> Result<bool, DatabaseError> {
        self.hit();
        HelpdeskStore::delete_ticket(&self.inner, actor, id).await
    }
    async fn list_audit_logs(&self, filter: &AuditFilter) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        self.hit();
        HelpdeskStore::list_audit_logs(&self.inner, filter).await
    }
    async fn get_audit_log(&self, id: &str) -> Result<Option<AuditLogEntry>, DatabaseError> {
        self.hit();
        HelpdeskStore::get_audit_log(&self.inner, id).await
    }
}

fn sao_paulo_client(name: &str) -> NewClient {
    NewClient {
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        ..rio_client(name)
    }
}

fn rio_client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        contact_person: "Maria Souza".to_string(),
        email: "contato@example.com".to_string(),
        phone: "+55 21 5555-0100".to_string(),
        address: "Rua das Flores, 100".to_string(),
        city: "Rio de Janeiro".to_string(),
        state: "RJ".to_string(),
        agency_number: None,
        agency_name: None,
    }
}

/// Seed the first admin outside the gate, the way bootstrap does.
async fn seeded_desk() -> (Desk<HelpdeskService>, User) {
    let svc = HelpdeskService::new_local(":memory:").await.unwrap();
    let admin = HelpdeskStore::create_user(
        &svc,
        None,
        NewUser::new("Ana Admin", "ana@example.com", "s3cret", Role::Admin),
    )
    .await
    .unwrap();
    (Desk::new(svc), admin)
}

#[tokio::test]
async fn technician_client_delete_never_reaches_store() {
    let desk = Desk::new(CountingStore::new().await);
    let tech = Actor::new("usr-tech", Role::Technician);

    let err = desk.delete_client(&tech, "cli-anything").await.unwrap_err();

    assert!(matches!(err, DeskError::AuthorizationDenied { role: Role::Technician, .. }));
    assert_eq!(
        err.user_message(),
        "You do not have permission to delete clients."
    );
    assert_eq!(desk.store().calls(), 0);
}

#[tokio::test]
async fn technician_cannot_list_clients_or_read_audit() {
    let desk = Desk::new(CountingStore::new().await);
    let tech = Actor::new("usr-tech", Role::Technician);

    assert!(desk.list_clients(&tech).await.is_err());
    assert!(desk.list_audit_logs(&tech, &AuditFilter::default()).await.is_err());
    assert!(desk.create_client(&tech, rio_client("Acme")).await.is_err());
    assert_eq!(desk.store().calls(), 0);
}

#[tokio::test]
async fn wrong_password_leaves_no_session() {
    let (desk, _) = seeded_desk().await;
    let mut session = SessionHolder::in_memory();

    let err = session
        .login(desk.store(), "ana@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, DeskError::AuthenticationFailed));
    assert!(session.current_user().is_none());
    assert!(matches!(session.require_actor(), Err(DeskError::NotAuthenticated)));
}

#[tokio::test]
async fn login_then_logout() {
    let (desk, admin) = seeded_desk().await;
    let mut session = SessionHolder::in_memory();

    let user = session
        .login(desk.store(), "ANA@example.com", "s3cret")
        .await
        .unwrap();
    assert_eq!(user.id, admin.id);
    assert_eq!(session.actor(), Some(Actor::new(admin.id.clone(), Role::Admin)));

    session.logout().unwrap();
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn persisted_session_survives_restart() {
    let (desk, admin) = seeded_desk().await;
    let dir = tempfile::tempdir().unwrap();

    let mut first =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    first
        .login(desk.store(), "ana@example.com", "s3cret")
        .await
        .unwrap();

    let second =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    assert_eq!(second.current_user().map(|u| u.id.as_str()), Some(admin.id.as_str()));

    let mut third =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    third.logout().unwrap();
    let fourth =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    assert!(fourth.current_user().is_none());
}

#[tokio::test]
async fn restored_session_picks_up_a_demotion() {
    let (desk, admin) = seeded_desk().await;
    let admin = Actor::from(&admin);
    let max = desk
        .create_user(&admin, NewUser::new("Max", "max@example.com", "pw", Role::Manager))
        .await
        .unwrap();
    let client = desk.create_client(&admin, rio_client("Acme")).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let mut first =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    first
        .login(desk.store(), "max@example.com", "pw")
        .await
        .unwrap();

    let demote = UserUpdateBuilder::new().role(Role::Technician).build();
    desk.update_user(&admin, &max.id, demote).await.unwrap();

    let mut second =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    second.refresh(desk.store()).await.unwrap();
    let actor = second.require_actor().unwrap();
    assert_eq!(actor, Actor::new(max.id.clone(), Role::Technician));

    let err = desk.delete_client(&actor, &client.id).await.unwrap_err();
    assert!(matches!(err, DeskError::AuthorizationDenied { role: Role::Technician, .. }));

    // The refreshed role is what the next process restores.
    let third =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    assert_eq!(third.current_user().map(|u| u.role), Some(Role::Technician));
}

#[tokio::test]
async fn restored_session_of_deleted_user_is_dropped() {
    let (desk, admin) = seeded_desk().await;
    let admin = Actor::from(&admin);
    let max = desk
        .create_user(&admin, NewUser::new("Max", "max@example.com", "pw", Role::Manager))
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let mut first =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    first
        .login(desk.store(), "max@example.com", "pw")
        .await
        .unwrap();
    desk.delete_user(&admin, &max.id).await.unwrap();

    let mut second =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    assert!(second.current_user().is_some());
    second.refresh(desk.store()).await.unwrap();
    assert!(second.current_user().is_none());
    assert!(matches!(second.require_actor(), Err(DeskError::NotAuthenticated)));

    let third =
        SessionHolder::persistent(SessionStore::new(KeyedFileStore::new(dir.path()))).unwrap();
    assert!(third.current_user().is_none());
}

#[tokio::test]
async fn manager_admin_cannot_create_admin() {
    let (desk, admin) = seeded_desk().await;
    let admin = Actor::from(&admin);
    let boss = desk
        .create_user(
            &admin,
            NewUser::new("Bia", "bia@example.com", "pw", Role::ManagerAdmin),
        )
        .await
        .unwrap();
    let boss = Actor::from(&boss);

    let err = desk
        .create_user(&boss, NewUser::new("Eve", "eve@example.com", "pw", Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::AuthorizationDenied { .. }));

    let tech = desk
        .create_user(&boss, NewUser::new("Caio", "caio@example.com", "pw", Role::Technician))
        .await
        .unwrap();
    assert_eq!(tech.role, Role::Technician);

    // Promoting to admin or editing an admin is equally out of reach.
    let promote = UserUpdateBuilder::new().role(Role::Admin).build();
    assert!(desk.update_user(&boss, &tech.id, promote).await.is_err());
    let rename = UserUpdateBuilder::new().name("Root").build();
    assert!(desk.update_user(&boss, &admin.user_id, rename).await.is_err());
}

#[tokio::test]
async fn nobody_deletes_themselves() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);

    let err = desk.delete_user(&actor, &admin.id).await.unwrap_err();

    assert!(matches!(err, DeskError::Invalid(_)));
    assert_eq!(desk.list_users(&actor).await.unwrap().len(), 1);
}

#[tokio::test]
async fn ticket_location_defaults_to_client_city() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);
    let client = desk.create_client(&actor, rio_client("Acme")).await.unwrap();

    let ticket = desk
        .create_ticket(&actor, NewTicket::new("Printer jam", "Paper stuck", client.id.as_str()))
        .await
        .unwrap();

    assert_eq!(ticket.location, "Rio de Janeiro, RJ");
    assert_eq!(ticket.code, "HD-000001");
}

#[tokio::test]
async fn ticket_for_unknown_client_is_not_found() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);

    let err = desk
        .create_ticket(&actor, NewTicket::new("Printer jam", "Paper stuck", "cli-nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, DeskError::NotFound { ref entity, .. } if entity == "Client"));
}

#[tokio::test]
async fn moving_ticket_to_another_client_moves_its_location() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);
    let rio = desk.create_client(&actor, rio_client("Acme")).await.unwrap();
    let sp = desk.create_client(&actor, sao_paulo_client("Paulista")).await.unwrap();
    let ticket = desk
        .create_ticket(&actor, NewTicket::new("Printer jam", "Paper stuck", rio.id.as_str()))
        .await
        .unwrap();

    let to_sp = TicketUpdateBuilder::new().client_id(sp.id.as_str()).build();
    let moved = desk.update_ticket(&actor, &ticket.id, to_sp).await.unwrap();
    assert_eq!(moved.client_id, sp.id);
    assert_eq!(moved.location, "São Paulo, SP");

    // An explicit location wins over the client's city.
    let back = TicketUpdateBuilder::new()
        .client_id(rio.id.as_str())
        .location("Branch 12, 3rd floor")
        .build();
    let moved = desk.update_ticket(&actor, &ticket.id, back).await.unwrap();
    assert_eq!(moved.location, "Branch 12, 3rd floor");

    let nowhere = TicketUpdateBuilder::new().client_id("cli-nope").build();
    let err = desk.update_ticket(&actor, &ticket.id, nowhere).await.unwrap_err();
    assert!(matches!(err, DeskError::NotFound { ref entity, .. } if entity == "Client"));
}

#[tokio::test]
async fn client_update_heads_the_audit_trail() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);
    let client = desk.create_client(&actor, rio_client("Acme")).await.unwrap();
    let all = AuditFilter::default();
    let before = desk.list_audit_logs(&actor, &all).await.unwrap().len();

    let update = ClientUpdateBuilder::new().name("Acme Ltda").build();
    desk.update_client(&actor, &client.id, update).await.unwrap();

    let trail = desk.list_audit_logs(&actor, &all).await.unwrap();
    assert_eq!(trail.len(), before + 1);
    let head = &trail[0];
    assert_eq!(head.action, AuditAction::Update);
    assert_eq!(head.entity, AuditEntity::Client);
    assert_eq!(head.entity_id.as_deref(), Some(client.id.as_str()));
    assert_eq!(head.user_id.as_deref(), Some(admin.id.as_str()));
    assert_eq!(head.details, "Client 'Acme Ltda' updated.");

    let (_, subject) = desk.audit_subject(&actor, &head.id).await.unwrap();
    assert!(matches!(subject, AuditSubject::Client(ref c) if c.name == "Acme Ltda"));

    // Nothing to change: the record comes back untouched and unaudited.
    let unchanged = desk
        .update_client(&actor, &client.id, ClientUpdateBuilder::new().build())
        .await
        .unwrap();
    assert_eq!(unchanged.name, "Acme Ltda");
    assert_eq!(desk.list_audit_logs(&actor, &all).await.unwrap().len(), before + 1);
}

#[tokio::test]
async fn deleted_subject_is_not_found() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);
    let client = desk.create_client(&actor, rio_client("Acme")).await.unwrap();
    desk.delete_client(&actor, &client.id).await.unwrap();

    let filter = AuditFilter {
        action: Some(AuditAction::Create),
        ..AuditFilter::default()
    };
    let created = desk.list_audit_logs(&actor, &filter).await.unwrap();
    let entry = created
        .iter()
        .find(|e| e.entity == AuditEntity::Client)
        .unwrap();

    let err = desk.audit_subject(&actor, &entry.id).await.unwrap_err();
    assert!(matches!(err, DeskError::NotFound { .. }));
}

#[tokio::test]
async fn technician_can_read_but_not_edit_print_settings() {
    let (desk, _) = seeded_desk().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = SettingsStore::new(KeyedFileStore::new(dir.path()));
    let tech = Actor::new("usr-tech", Role::Technician);
    let admin = Actor::new("usr-admin", Role::Admin);

    let patch = PrintHeaderPatch {
        company_name: Some("Acme Service".into()),
        ..PrintHeaderPatch::default()
    };
    assert!(desk.update_print_settings(&tech, &settings, patch.clone()).is_err());

    desk.update_print_settings(&admin, &settings, patch).unwrap();
    let read = desk.print_settings(&tech, &settings).unwrap();
    assert_eq!(read.company_name, "Acme Service");
}

#[tokio::test]
async fn dashboard_counts_by_status() {
    let (desk, admin) = seeded_desk().await;
    let actor = Actor::from(&admin);
    let client = desk.create_client(&actor, rio_client("Acme")).await.unwrap();
    for title in ["One", "Two"] {
        desk.create_ticket(&actor, NewTicket::new(title, "Broken", client.id.as_str()))
            .await
            .unwrap();
    }

    let tech = Actor::new("usr-tech", Role::Technician);
    let stats = desk.dashboard(&tech).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.open, 2);
}
