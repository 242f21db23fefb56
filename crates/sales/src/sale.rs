use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openpos_core::{CustomerId, DomainError, Entity, SaleId, ShopId, UserId};

use crate::cart::{Cart, CartLine};

/// A completed sale, appended to the `sales` collection at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub shop_id: ShopId,
    pub cashier_id: UserId,
    pub customer_id: Option<CustomerId>,
    pub lines: Vec<CartLine>,
    /// Sum of line totals in cents.
    pub subtotal: u64,
    /// Whole-cart discount in cents.
    pub discount: u64,
    /// `subtotal - discount`.
    pub total: u64,
    /// Cash handed over in cents.
    pub tendered: u64,
    /// `tendered - total`.
    pub change: u64,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Settle `cart` into a sale record.
    ///
    /// Pure arithmetic and validation; stock deduction and persistence are
    /// the application service's job.
    pub fn checkout(
        shop_id: ShopId,
        cashier_id: UserId,
        customer_id: Option<CustomerId>,
        cart: &Cart,
        discount: u64,
        tendered: u64,
        sold_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::validation("cannot check out an empty cart"));
        }
        let subtotal = cart.subtotal();
        if discount > subtotal {
            return Err(DomainError::validation("discount exceeds subtotal"));
        }
        let total = subtotal - discount;
        if tendered < total {
            return Err(DomainError::validation("tendered amount is short of the total"));
        }
        Ok(Self {
            id: SaleId::new(),
            shop_id,
            cashier_id,
            customer_id,
            lines: cart.lines().to_vec(),
            subtotal,
            discount,
            total,
            tendered,
            change: tendered - total,
            sold_at,
        })
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use openpos_catalog::{Product, ProductCategory};

    fn cart_with(price: u64, quantity: i64) -> Cart {
        let product =
            Product::new("SKU", "Tea", ProductCategory::Grocery, price, Utc::now()).unwrap();
        let mut cart = Cart::new();
        cart.add(&product, quantity).unwrap();
        cart
    }

    #[test]
    fn checkout_totals_add_up() {
        let cart = cart_with(250, 4);
        let sale = Sale::checkout(
            ShopId::new(),
            UserId::new(),
            None,
            &cart,
            100,
            1000,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(sale.subtotal, 1000);
        assert_eq!(sale.total, 900);
        assert_eq!(sale.change, 100);
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let err = Sale::checkout(
            ShopId::new(),
            UserId::new(),
            None,
            &Cart::new(),
            0,
            0,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn discount_cannot_exceed_subtotal() {
        let cart = cart_with(100, 1);
        assert!(
            Sale::checkout(ShopId::new(), UserId::new(), None, &cart, 200, 500, Utc::now())
                .is_err()
        );
    }

    #[test]
    fn short_tender_is_rejected() {
        let cart = cart_with(100, 1);
        assert!(
            Sale::checkout(ShopId::new(), UserId::new(), None, &cart, 0, 99, Utc::now()).is_err()
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// total + change always equals tendered + discount-adjusted math.
            #[test]
            fn checkout_arithmetic_is_consistent(
                price in 1u64..10_000,
                quantity in 1i64..50,
                discount_pct in 0u64..=100,
            ) {
                let cart = cart_with(price, quantity);
                let subtotal = cart.subtotal();
                let discount = subtotal * discount_pct / 100;
                let tendered = subtotal;
                let sale = Sale::checkout(
                    ShopId::new(),
                    UserId::new(),
                    None,
                    &cart,
                    discount,
                    tendered,
                    Utc::now(),
                ).unwrap();
                prop_assert_eq!(sale.total, subtotal - discount);
                prop_assert_eq!(sale.tendered - sale.change, sale.total);
            }
        }
    }
}
