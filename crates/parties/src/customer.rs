use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{CustomerId, DomainError, Entity};

use crate::contact::ContactInfo;

/// A customer on file, attachable to sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: ContactInfo,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        Ok(Self {
            id: CustomerId::new(),
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

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_customer_names_are_rejected() {
        assert!(matches!(
            Customer::new(" ", Utc::now()).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn contact_defaults_to_empty() {
        let customer = Customer::new("Walk-in", Utc::now()).unwrap();
        assert!(customer.contact.is_empty());
    }
}
