use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Functional area a permission check is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionModule {
    Inventory,
    Sales,
    Customers,
    Reports,
    Settings,
    Shops,
    Suppliers,
    Exchange,
    Pos,
    Users,
}

impl PermissionModule {
    pub const ALL: [PermissionModule; 10] = [
        PermissionModule::Inventory,
        PermissionModule::Sales,
        PermissionModule::Customers,
        PermissionModule::Reports,
        PermissionModule::Settings,
        PermissionModule::Shops,
        PermissionModule::Suppliers,
        PermissionModule::Exchange,
        PermissionModule::Pos,
        PermissionModule::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionModule::Inventory => "inventory",
            PermissionModule::Sales => "sales",
            PermissionModule::Customers => "customers",
            PermissionModule::Reports => "reports",
            PermissionModule::Settings => "settings",
            PermissionModule::Shops => "shops",
            PermissionModule::Suppliers => "suppliers",
            PermissionModule::Exchange => "exchange",
            PermissionModule::Pos => "pos",
            PermissionModule::Users => "users",
        }
    }
}

impl core::fmt::Display for PermissionModule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action checked within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
    Export,
    /// Run a checkout at the register.
    Process,
    /// Reverse a completed sale.
    Refund,
    /// Move stock between shops.
    Transfer,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::Create => "create",
            PermissionAction::Edit => "edit",
            PermissionAction::Delete => "delete",
            PermissionAction::Export => "export",
            PermissionAction::Process => "process",
            PermissionAction::Refund => "refund",
            PermissionAction::Transfer => "transfer",
        }
    }
}

impl core::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granted actions per module for one role.
///
/// A module that is absent, or an action not in a module's set, is simply
/// not granted. Lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    grants: BTreeMap<PermissionModule, BTreeSet<PermissionAction>>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `actions` on `module`, merging with any existing grant.
    pub fn grant(
        mut self,
        module: PermissionModule,
        actions: impl IntoIterator<Item = PermissionAction>,
    ) -> Self {
        self.grants.entry(module).or_default().extend(actions);
        self
    }

    /// Is `action` granted on `module`?
    pub fn allows(&self, module: PermissionModule, action: PermissionAction) -> bool {
        self.grants
            .get(&module)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// All actions granted on `module` (empty if the module is absent).
    pub fn actions(&self, module: PermissionModule) -> impl Iterator<Item = PermissionAction> + '_ {
        self.grants.get(&module).into_iter().flatten().copied()
    }

    /// Modules with at least one granted action.
    pub fn modules(&self) -> impl Iterator<Item = PermissionModule> + '_ {
        self.grants.keys().copied()
    }
}

use PermissionAction::*;
use PermissionModule::*;

/// Every action that exists on a module (the admin/master grant).
fn full_actions(module: PermissionModule) -> Vec<PermissionAction> {
    match module {
        Inventory | Customers | Shops | Suppliers | Users => {
            vec![View, Create, Edit, Delete]
        }
        Sales => vec![View, Export, Delete],
        Reports => vec![View, Export],
        Settings => vec![View, Edit],
        Exchange => vec![View, Transfer],
        Pos => vec![View, Process, Refund],
    }
}

/// The static permission table for `role`.
///
/// Rebuilt on every call; nothing caches the tables. Unknown roles get the
/// cashier table.
pub fn default_permissions(role: Role) -> Permissions {
    match role.effective() {
        Role::Admin | Role::Master => PermissionModule::ALL
            .into_iter()
            .fold(Permissions::new(), |p, m| p.grant(m, full_actions(m))),
        Role::Manager => Permissions::new()
            .grant(Inventory, [View, Create, Edit])
            .grant(Sales, [View, Export])
            .grant(Customers, [View, Create, Edit, Delete])
            .grant(Reports, [View, Export])
            .grant(Settings, [View])
            .grant(Shops, [View])
            .grant(Suppliers, [View, Create, Edit])
            .grant(Exchange, [View, Transfer])
            .grant(Pos, [View, Process, Refund])
            .grant(Users, [View]),
        Role::Cashier | Role::Unknown => Permissions::new()
            .grant(Pos, [View, Process])
            .grant(Sales, [View])
            .grant(Customers, [View, Create]),
    }
}

/// Table lookup by role *name*, for callers holding raw strings.
pub fn default_permissions_named(role_name: &str) -> Permissions {
    default_permissions(Role::parse(role_name))
}
