use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::enums::Role;

/// The acting user for a core call.
///
/// Passed explicitly into every mutation so the audit trail can attribute it
/// and the authorization matrix can gate it. Produced by the session holder
/// in `hd-auth` from the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
        }
    }
}
