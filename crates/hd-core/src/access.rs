//! Authorization matrix.
//!
//! Pure, stateless decisions over `(acting role, page | action, target role)`.
//! The table is closed:
//!
//! | role          | pages                                        | clients | assignable roles                        | audit | delete |
//! |---------------|----------------------------------------------|---------|-----------------------------------------|-------|--------|
//! | admin         | all                                          | yes     | admin, manager_admin, manager, technician | yes | yes    |
//! | manager_admin | dashboard, tickets, reports, clients, users  | yes     | manager_admin, manager, technician      | no    | yes    |
//! | manager       | dashboard, tickets, reports, clients         | yes     | none                                    | no    | yes    |
//! | technician    | dashboard, tickets, reports                  | no      | none                                    | no    | no     |
//!
//! Every role may create and edit tickets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{Page, Role};
use crate::errors::CoreError;

/// A gated operation, independent of which record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewPage(Page),
    CreateTicket,
    EditTicket,
    DeleteTicket,
    ManageClients,
    DeleteClient,
    ManageUsers,
    ViewAudit,
    EditSettings,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewPage(page) => write!(f, "view the {page} page"),
            Self::CreateTicket => f.write_str("create tickets"),
            Self::EditTicket => f.write_str("edit tickets"),
            Self::DeleteTicket => f.write_str("delete tickets"),
            Self::ManageClients => f.write_str("manage clients"),
            Self::DeleteClient => f.write_str("delete clients"),
            Self::ManageUsers => f.write_str("manage users"),
            Self::ViewAudit => f.write_str("view the audit trail"),
            Self::EditSettings => f.write_str("edit print settings"),
        }
    }
}

/// Pages offered in navigation for `role`.
#[must_use]
pub const fn visible_pages(role: Role) -> &'static [Page] {
    match role {
        Role::Admin => &Page::ALL,
        Role::ManagerAdmin => &[
            Page::Dashboard,
            Page::Tickets,
            Page::Reports,
            Page::Clients,
            Page::Users,
        ],
        Role::Manager => &[Page::Dashboard, Page::Tickets, Page::Reports, Page::Clients],
        Role::Technician => &[Page::Dashboard, Page::Tickets, Page::Reports],
    }
}

/// Roles `role` may assign when creating or editing a user.
///
/// Never includes a role that outranks `role`.
#[must_use]
pub const fn assignable_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &Role::ALL,
        Role::ManagerAdmin => &[Role::ManagerAdmin, Role::Manager, Role::Technician],
        Role::Manager | Role::Technician => &[],
    }
}

/// Whether `role` may assign `target` to a user.
#[must_use]
pub fn can_assign_role(role: Role, target: Role) -> bool {
    assignable_roles(role).contains(&target)
}

/// Whether `role` may open `page`.
#[must_use]
pub fn can_view(role: Role, page: Page) -> bool {
    visible_pages(role).contains(&page)
}

/// The matrix lookup.
#[must_use]
pub fn permits(role: Role, action: Action) -> bool {
    match action {
        Action::ViewPage(page) => can_view(role, page),
        Action::CreateTicket | Action::EditTicket => true,
        Action::ManageClients | Action::DeleteClient | Action::DeleteTicket => {
            !matches!(role, Role::Technician)
        }
        Action::ManageUsers => !assignable_roles(role).is_empty(),
        Action::ViewAudit => can_view(role, Page::Audit),
        Action::EditSettings => can_view(role, Page::Settings),
    }
}

/// [`permits`] as a `Result`, for use with `?` before a store call.
///
/// # Errors
///
/// Returns `CoreError::AuthorizationDenied` when the matrix rejects the action.
pub fn authorize(role: Role, action: Action) -> Result<(), CoreError> {
    if permits(role, action) {
        Ok(())
    } else {
        Err(CoreError::AuthorizationDenied {
            role,
            action: action.to_string(),
        })
    }
}

/// Check that `role` may assign `target`.
///
/// # Errors
///
/// Returns `CoreError::AuthorizationDenied` when `target` is outside
/// [`assignable_roles`] for `role`.
pub fn authorize_role_assignment(role: Role, target: Role) -> Result<(), CoreError> {
    if can_assign_role(role, target) {
        Ok(())
    } else {
        Err(CoreError::AuthorizationDenied {
            role,
            action: format!("manage {target} users"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Admin, &[Role::Admin, Role::ManagerAdmin, Role::Manager, Role::Technician])]
    #[case(Role::ManagerAdmin, &[Role::ManagerAdmin, Role::Manager, Role::Technician])]
    #[case(Role::Manager, &[])]
    #[case(Role::Technician, &[])]
    fn assignable_roles_match_table(#[case] role: Role, #[case] expected: &[Role]) {
        assert_eq!(assignable_roles(role), expected);
    }

    #[test]
    fn assignable_roles_never_outrank_actor() {
        for role in Role::ALL {
            for target in assignable_roles(role) {
                assert!(!target.outranks(role), "{role} can assign {target}");
            }
        }
    }

    #[rstest]
    #[case(Role::Admin, 7)]
    #[case(Role::ManagerAdmin, 5)]
    #[case(Role::Manager, 4)]
    #[case(Role::Technician, 3)]
    fn visible_page_counts(#[case] role: Role, #[case] count: usize) {
        assert_eq!(visible_pages(role).len(), count);
    }

    #[rstest]
    #[case(Role::Admin, Page::Audit, true)]
    #[case(Role::Admin, Page::Settings, true)]
    #[case(Role::ManagerAdmin, Page::Users, true)]
    #[case(Role::ManagerAdmin, Page::Audit, false)]
    #[case(Role::Manager, Page::Clients, true)]
    #[case(Role::Manager, Page::Users, false)]
    #[case(Role::Technician, Page::Reports, true)]
    #[case(Role::Technician, Page::Clients, false)]
    fn page_visibility(#[case] role: Role, #[case] page: Page, #[case] allowed: bool) {
        assert_eq!(can_view(role, page), allowed);
    }

    #[rstest]
    #[case(Role::Admin, true, true, true, true)]
    #[case(Role::ManagerAdmin, true, true, false, true)]
    #[case(Role::Manager, true, false, false, true)]
    #[case(Role::Technician, false, false, false, false)]
    fn action_matrix(
        #[case] role: Role,
        #[case] clients: bool,
        #[case] users: bool,
        #[case] audit: bool,
        #[case] delete: bool,
    ) {
        assert_eq!(permits(role, Action::ManageClients), clients);
        assert_eq!(permits(role, Action::ManageUsers), users);
        assert_eq!(permits(role, Action::ViewAudit), audit);
        assert_eq!(permits(role, Action::DeleteTicket), delete);
        assert_eq!(permits(role, Action::DeleteClient), delete);
        assert!(permits(role, Action::CreateTicket));
        assert!(permits(role, Action::EditTicket));
    }

    #[test]
    fn authorize_reports_role_and_action() {
        let err = authorize(Role::Technician, Action::DeleteClient).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AuthorizationDenied { role: Role::Technician, .. }
        ));
        assert_eq!(err.to_string(), "technician is not allowed to delete clients");
    }

    #[test]
    fn manager_admin_cannot_assign_admin() {
        assert!(authorize_role_assignment(Role::ManagerAdmin, Role::Admin).is_err());
        assert!(authorize_role_assignment(Role::ManagerAdmin, Role::ManagerAdmin).is_ok());
        assert!(authorize_role_assignment(Role::Manager, Role::Technician).is_err());
    }
}
