use serde::{Deserialize, Serialize};

/// Access level of a user.
///
/// The set is fixed; role names arriving from persisted data that do not
/// match any known role deserialize to [`Role::Unknown`], which every table
/// lookup treats as [`Role::Cashier`] (the most restrictive role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Master,
    Manager,
    Cashier,
    /// Any role name outside the fixed set.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn parse(name: &str) -> Self {
        match name {
            "admin" => Role::Admin,
            "master" => Role::Master,
            "manager" => Role::Manager,
            "cashier" => Role::Cashier,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Master => "master",
            Role::Manager => "manager",
            Role::Cashier => "cashier",
            Role::Unknown => "unknown",
        }
    }

    /// The role whose tables apply for lookups: unknown degrades to cashier.
    pub fn effective(&self) -> Role {
        match self {
            Role::Unknown => Role::Cashier,
            other => *other,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
