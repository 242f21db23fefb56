use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{DomainError, Entity, ProductId, ShopId};

/// A shop location, carrying its own on-hand stock.
///
/// The `on_hand` map is the only stock ledger in the system. Quantities are
/// clamped at zero on deduction; they never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub location: String,
    pub on_hand: BTreeMap<ProductId, i64>,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("shop name cannot be empty"));
        }
        Ok(Self {
            id: ShopId::new(),
            name,
            location: location.into(),
            on_hand: BTreeMap::new(),
            created_at,
        })
    }

    /// Units of `product` currently on hand (absent products count zero).
    pub fn on_hand(&self, product: ProductId) -> i64 {
        self.on_hand.get(&product).copied().unwrap_or(0)
    }

    /// Add received stock.
    pub fn receive(&mut self, product: ProductId, quantity: i64) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("received quantity must be positive"));
        }
        *self.on_hand.entry(product).or_insert(0) += quantity;
        Ok(())
    }

    /// Remove stock, clamped at zero.
    ///
    /// Returns the quantity actually removed, which is less than `quantity`
    /// when the shop held fewer units.
    pub fn deduct(&mut self, product: ProductId, quantity: i64) -> Result<i64, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("deducted quantity must be positive"));
        }
        let held = self.on_hand(product);
        let removed = held.min(quantity);
        if removed > 0 {
            self.on_hand.insert(product, held - removed);
        }
        Ok(removed)
    }

    /// Set an absolute quantity (inventory editing).
    pub fn set_stock(&mut self, product: ProductId, quantity: i64) -> Result<(), DomainError> {
        if quantity < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        self.on_hand.insert(product, quantity);
        Ok(())
    }

    /// Can `quantity` units of `product` leave this shop?
    pub fn has_stock(&self, product: ProductId, quantity: i64) -> bool {
        quantity > 0 && self.on_hand(product) >= quantity
    }
}

impl Entity for Shop {
    type Id = ShopId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> Shop {
        Shop::new("Main Street", "12 Main St", Utc::now()).unwrap()
    }

    #[test]
    fn receive_then_deduct_balances() {
        let mut shop = shop();
        let product = ProductId::new();
        shop.receive(product, 10).unwrap();
        let removed = shop.deduct(product, 4).unwrap();
        assert_eq!(removed, 4);
        assert_eq!(shop.on_hand(product), 6);
    }

    #[test]
    fn deduct_clamps_at_zero() {
        let mut shop = shop();
        let product = ProductId::new();
        shop.receive(product, 3).unwrap();
        let removed = shop.deduct(product, 10).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(shop.on_hand(product), 0);
    }

    #[test]
    fn absent_products_count_zero_on_hand() {
        let shop = shop();
        assert_eq!(shop.on_hand(ProductId::new()), 0);
        assert!(!shop.has_stock(ProductId::new(), 1));
    }

    #[test]
    fn nonpositive_quantities_are_rejected() {
        let mut shop = shop();
        let product = ProductId::new();
        assert!(shop.receive(product, 0).is_err());
        assert!(shop.deduct(product, -1).is_err());
        assert!(shop.set_stock(product, -5).is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Stock never goes negative, whatever sequence of deductions runs.
            #[test]
            fn stock_never_negative(start in 0i64..1000, deductions in proptest::collection::vec(1i64..100, 0..20)) {
                let mut shop = Shop::new("P", "", Utc::now()).unwrap();
                let product = ProductId::new();
                shop.set_stock(product, start).unwrap();
                for q in deductions {
                    shop.deduct(product, q).unwrap();
                    prop_assert!(shop.on_hand(product) >= 0);
                }
            }
        }
    }
}
