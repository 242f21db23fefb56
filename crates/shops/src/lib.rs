//! Shop records and per-shop stock bookkeeping.

pub mod shop;

pub use shop::Shop;
