use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// All routed paths in the application shell.
pub const ROUTES: [&str; 11] = [
    "/",
    "/pos",
    "/inventory",
    "/customers",
    "/sales",
    "/reports",
    "/settings",
    "/shops",
    "/suppliers",
    "/exchange",
    "/users",
];

/// Per-role map of route path to accessibility.
///
/// Paths not present in the map are inaccessible; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAccess {
    routes: BTreeMap<String, bool>,
}

impl RouteAccess {
    pub fn can_access(&self, path: &str) -> bool {
        self.routes.get(path).copied().unwrap_or(false)
    }

    pub fn allowed_paths(&self) -> impl Iterator<Item = &str> {
        self.routes
            .iter()
            .filter(|(_, allowed)| **allowed)
            .map(|(path, _)| path.as_str())
    }

    fn from_denied(denied: &[&str]) -> Self {
        let routes = ROUTES
            .iter()
            .map(|path| (path.to_string(), !denied.contains(path)))
            .collect();
        Self { routes }
    }

    fn from_allowed(allowed: &[&str]) -> Self {
        let routes = ROUTES
            .iter()
            .map(|path| (path.to_string(), allowed.contains(path)))
            .collect();
        Self { routes }
    }
}

/// The static route table for `role`. Unknown roles get the cashier table.
pub fn default_route_access(role: Role) -> RouteAccess {
    match role.effective() {
        Role::Admin | Role::Master => RouteAccess::from_denied(&[]),
        Role::Manager => RouteAccess::from_denied(&["/users", "/settings"]),
        Role::Cashier | Role::Unknown => {
            RouteAccess::from_allowed(&["/", "/pos", "/sales", "/customers"])
        }
    }
}
