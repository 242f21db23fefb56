//! Cart, checkout, and canned sales reports.
//!
//! All money amounts are integer cents; totals are computed, never stored
//! authoritatively anywhere else.

pub mod cart;
pub mod report;
pub mod sale;

pub use cart::{Cart, CartLine};
pub use report::{DailySummary, ProductSales, RangeSummary, daily_summary, summary_between, top_products};
pub use sale::Sale;
