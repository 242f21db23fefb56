//! Product catalog records.
//!
//! Describes *what* is sold: sku, name, category, pricing. How many are on
//! hand is a per-shop concern and lives with the shops.

pub mod product;

pub use product::{Product, ProductCategory};
