use serde::{Deserialize, Serialize};

/// The fixed prefix every storage key carries.
pub const KEY_PREFIX: &str = "openpos.";

/// A named, wholesale-persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Products,
    Customers,
    Suppliers,
    Shops,
    Users,
    Cart,
    Sales,
    Transfers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Customers => "customers",
            Collection::Suppliers => "suppliers",
            Collection::Shops => "shops",
            Collection::Users => "users",
            Collection::Cart => "cart",
            Collection::Sales => "sales",
            Collection::Transfers => "transfers",
        }
    }

    /// Storage key for this collection's blob.
    pub fn key(&self) -> String {
        format!("{KEY_PREFIX}{}", self.as_str())
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
