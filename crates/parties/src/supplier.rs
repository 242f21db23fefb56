use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{DomainError, Entity, SupplierId};

use crate::contact::ContactInfo;

/// A supplier products can be sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: ContactInfo,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        Ok(Self {
            id: SupplierId::new(),
            name,
            contact: ContactInfo::default(),
            created_at,
        })
    }

    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_supplier_names_are_rejected() {
        assert!(matches!(
            Supplier::new("", Utc::now()).unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
