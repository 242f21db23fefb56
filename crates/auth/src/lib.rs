//! `openpos-auth` — roles, permission tables, and the permission resolver.
//!
//! This crate is intentionally decoupled from storage and presentation:
//! tables are constant data, lookups are pure, and unknown input degrades
//! to the most restrictive role instead of erroring.

pub mod permissions;
pub mod resolver;
pub mod role;
pub mod routes;
pub mod user;

pub use permissions::{
    PermissionAction, PermissionModule, Permissions, default_permissions, default_permissions_named,
};
pub use resolver::{
    AuthzError, PermissionsProvider, StaticTables, can_access_route, has_permission, require,
};
pub use role::Role;
pub use routes::{ROUTES, RouteAccess, default_route_access};
pub use user::{User, UserStatus};
