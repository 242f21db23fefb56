use serde::{Deserialize, Serialize};

use openpos_catalog::Product;
use openpos_core::{DomainError, ProductId};

/// One product line in the working cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in cents, captured when the line was added.
    pub unit_price: u64,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity.max(0) as u64)
    }
}

/// The working cart for the current register session.
///
/// Persisted wholesale to the `cart` collection so an interrupted session
/// can be resumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("cart quantity must be positive"));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
            });
        }
        Ok(())
    }

    /// Set an absolute quantity for a line; zero removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), DomainError> {
        if quantity < 0 {
            return Err(DomainError::validation("cart quantity cannot be negative"));
        }
        if quantity == 0 {
            self.remove(product_id);
            return Ok(());
        }
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(DomainError::not_found()),
        }
    }

    /// Remove a line; `false` when no line holds the product.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals in cents.
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total unit count across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
