use hd_core::enums::AuditEntity;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Audit entity tags are stored capitalized; accept any case on the command line.
pub fn parse_entity(raw: &str) -> anyhow::Result<AuditEntity> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "user" => Ok(AuditEntity::User),
        "client" => Ok(AuditEntity::Client),
        "ticket" => Ok(AuditEntity::Ticket),
        _ => anyhow::bail!("invalid entity '{raw}': expected user, client, or ticket"),
    }
}
