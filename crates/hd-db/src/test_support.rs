//! Shared fixtures for hd-db tests.

use hd_core::entities::{Client, NewClient, NewTicket, NewUser, User};
use hd_core::enums::Role;
use hd_core::identity::Actor;

use crate::service::HelpdeskService;

/// In-memory service with the production schema.
pub async fn test_service() -> HelpdeskService {
    HelpdeskService::new_local(":memory:").await.unwrap()
}

pub fn admin_actor() -> Actor {
    Actor::new("usr-admin", Role::Admin)
}

pub fn sample_client(name: &str) -> NewClient {
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

pub async fn seed_client(svc: &HelpdeskService, name: &str) -> Client {
    svc.create_client(Some(&admin_actor()), sample_client(name))
        .await
        .unwrap()
}

pub async fn seed_user(svc: &HelpdeskService, email: &str, role: Role) -> User {
    svc.create_user(
        Some(&admin_actor()),
        NewUser::new("Test User", email, "s3cret", role),
    )
    .await
    .unwrap()
}

pub fn sample_ticket(title: &str, client: &Client) -> NewTicket {
    NewTicket::new(title, "Does not power on", client.id.as_str()).fill_location(client)
}
