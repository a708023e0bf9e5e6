use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require;
use crate::errors::CoreError;

/// A customer organization that opens tickets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code, uppercase.
    pub state: String,
    pub agency_number: Option<String>,
    pub agency_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub agency_number: Option<String>,
    pub agency_name: Option<String>,
}

impl NewClient {
    /// Required-field pre-check: name, email, contact person, phone, city, state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("contact_person", &self.contact_person)?;
        require("phone", &self.phone)?;
        require("city", &self.city)?;
        validate_state_code(&self.state)
    }

    /// Uppercase the state code and drop blank optional fields.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.state = self.state.trim().to_uppercase();
        self.agency_number = self.agency_number.filter(|s| !s.trim().is_empty());
        self.agency_name = self.agency_name.filter(|s| !s.trim().is_empty());
        self
    }
}

/// A state code is exactly two ASCII letters.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the code is not two letters.
pub fn validate_state_code(state: &str) -> Result<(), CoreError> {
    let state = state.trim();
    if state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "state must be a 2-letter code, got '{state}'"
        )))
    }
}
