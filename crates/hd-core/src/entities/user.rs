use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::require;
use crate::enums::Role;
use crate::errors::CoreError;

/// A dashboard user. The password is write-only and never part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Always lowercase.
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Required-field pre-check: name, email, password.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(CoreError::Validation(format!(
                "email '{}' is not a valid address",
                self.email
            )));
        }
        if self.password.is_empty() {
            return Err(CoreError::Validation("password is required".into()));
        }
        Ok(())
    }

    /// Email as stored and compared: trimmed, lowercase.
    #[must_use]
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

// Keep the password out of logs.
impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Normalize an email for storage and case-insensitive lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
