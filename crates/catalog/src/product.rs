use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{DomainError, Entity, ProductId, SupplierId};

/// Catalog grouping used by browse filters and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Grocery,
    Beverages,
    Electronics,
    Apparel,
    Household,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Grocery => "grocery",
            ProductCategory::Beverages => "beverages",
            ProductCategory::Electronics => "electronics",
            ProductCategory::Apparel => "apparel",
            ProductCategory::Household => "household",
            ProductCategory::Other => "other",
        }
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sellable product.
///
/// Prices are integer cents. On-hand quantities are tracked per shop, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    /// Selling price in smallest currency unit (cents).
    pub price: u64,
    /// Acquisition cost in cents, for margin reporting.
    pub cost: u64,
    pub supplier_id: Option<SupplierId>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category: ProductCategory,
        price: u64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let sku = sku.into();
        let name = name.into();
        if sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id: ProductId::new(),
            sku,
            name,
            category,
            price,
            cost: 0,
            supplier_id: None,
            created_at,
        })
    }

    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    /// Change the selling price.
    pub fn reprice(&mut self, price: u64) {
        self.price = price;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    /// Margin per unit in cents (zero when selling below cost).
    pub fn unit_margin(&self) -> u64 {
        self.price.saturating_sub(self.cost)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
