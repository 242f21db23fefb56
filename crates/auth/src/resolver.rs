//! The permission resolver: pure lookups against constant tables.
//!
//! Call sites receive a [`PermissionsProvider`] by injection rather than
//! importing tables as ambient state, so tests and future policy sources
//! can substitute their own tables.

use thiserror::Error;

use crate::permissions::{PermissionAction, PermissionModule, Permissions, default_permissions};
use crate::role::Role;
use crate::routes::{RouteAccess, default_route_access};
use crate::user::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {module}.{action} requires a grant the current role lacks")]
    Forbidden {
        module: PermissionModule,
        action: PermissionAction,
    },
}

/// Source of permission and route tables for a role.
pub trait PermissionsProvider {
    fn permissions(&self, role: Role) -> Permissions;
    fn route_access(&self, role: Role) -> RouteAccess;
}

/// The built-in constant tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTables;

impl PermissionsProvider for StaticTables {
    fn permissions(&self, role: Role) -> Permissions {
        default_permissions(role)
    }

    fn route_access(&self, role: Role) -> RouteAccess {
        default_route_access(role)
    }
}

/// Does `user`'s role grant `action` on `module`?
///
/// Absent modules and actions answer `false`; this never fails.
pub fn has_permission(
    provider: &impl PermissionsProvider,
    user: &User,
    module: PermissionModule,
    action: PermissionAction,
) -> bool {
    provider.permissions(user.role).allows(module, action)
}

/// Permission check as a guard, for use at operation boundaries.
pub fn require(
    provider: &impl PermissionsProvider,
    user: &User,
    module: PermissionModule,
    action: PermissionAction,
) -> Result<(), AuthzError> {
    if has_permission(provider, user, module, action) {
        Ok(())
    } else {
        tracing::debug!(
            role = %user.role,
            module = %module,
            action = %action,
            "permission denied"
        );
        Err(AuthzError::Forbidden { module, action })
    }
}

/// Can `user` open the route at `path`?
pub fn can_access_route(provider: &impl PermissionsProvider, user: &User, path: &str) -> bool {
    provider.route_access(user.role).can_access(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with(role: Role) -> User {
        User::new("Test User", role, None, Utc::now()).unwrap()
    }

    #[test]
    fn require_passes_for_granted_actions() {
        let user = user_with(Role::Admin);
        require(
            &StaticTables,
            &user,
            PermissionModule::Users,
            PermissionAction::Delete,
        )
        .unwrap();
    }

    #[test]
    fn require_names_the_missing_grant() {
        let user = user_with(Role::Cashier);
        let err = require(
            &StaticTables,
            &user,
            PermissionModule::Inventory,
            PermissionAction::Edit,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                module: PermissionModule::Inventory,
                action: PermissionAction::Edit,
            }
        );
    }

    #[test]
    fn unknown_role_checks_like_a_cashier() {
        let user = user_with(Role::Unknown);
        assert!(has_permission(
            &StaticTables,
            &user,
            PermissionModule::Pos,
            PermissionAction::Process,
        ));
        assert!(!has_permission(
            &StaticTables,
            &user,
            PermissionModule::Reports,
            PermissionAction::View,
        ));
        assert!(can_access_route(&StaticTables, &user, "/pos"));
        assert!(!can_access_route(&StaticTables, &user, "/reports"));
    }
}
