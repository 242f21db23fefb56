//! User record for the staff roster.
//!
//! Switching between users is a session affordance, not authentication;
//! there are no credentials here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{DomainError, Entity, ShopId, UserId};

use crate::role::Role;

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// User is active and can be selected at the register.
    #[default]
    Active,
    /// User is suspended and hidden from the switch-user list.
    Suspended,
}

/// A staff member with a role and an optional home shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub shop_id: Option<ShopId>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        shop_id: Option<ShopId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("user name cannot be empty"));
        }
        Ok(Self {
            id: UserId::new(),
            name,
            email: None,
            role,
            shop_id,
            status: UserStatus::Active,
            created_at,
        })
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
