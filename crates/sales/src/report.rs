//! Canned sales reports: pure folds over the `sales` collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use openpos_core::ProductId;

use crate::sale::Sale;

/// Totals for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sale_count: usize,
    /// Sum of sale subtotals in cents.
    pub gross: u64,
    /// Sum of discounts in cents.
    pub discount: u64,
    /// Sum of settled totals in cents.
    pub net: u64,
}

/// Totals over an inclusive date range (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub sale_count: usize,
    pub gross: u64,
    pub discount: u64,
    pub net: u64,
    pub days: Vec<DailySummary>,
}

/// Per-product sales totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    /// Revenue at captured unit prices, in cents.
    pub revenue: u64,
}

fn sale_date(sale: &Sale) -> NaiveDate {
    sale.sold_at.date_naive()
}

/// Summarize one day's sales.
pub fn daily_summary(sales: &[Sale], date: NaiveDate) -> DailySummary {
    let mut summary = DailySummary {
        date,
        sale_count: 0,
        gross: 0,
        discount: 0,
        net: 0,
    };
    for sale in sales.iter().filter(|s| sale_date(s) == date) {
        summary.sale_count += 1;
        summary.gross += sale.subtotal;
        summary.discount += sale.discount;
        summary.net += sale.total;
    }
    summary
}

/// Summarize an inclusive date range, with a per-day breakdown.
///
/// Days with no sales still appear, zeroed, so charts get a continuous
/// axis. An inverted range yields an empty summary.
pub fn summary_between(sales: &[Sale], from: NaiveDate, to: NaiveDate) -> RangeSummary {
    let mut days = Vec::new();
    let mut day = from;
    while day <= to {
        days.push(daily_summary(sales, day));
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    RangeSummary {
        from,
        to,
        sale_count: days.iter().map(|d| d.sale_count).sum(),
        gross: days.iter().map(|d| d.gross).sum(),
        discount: days.iter().map(|d| d.discount).sum(),
        net: days.iter().map(|d| d.net).sum(),
        days,
    }
}

/// The best-selling products by unit quantity, descending.
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<ProductSales> {
    let mut by_product: BTreeMap<ProductId, ProductSales> = BTreeMap::new();
    for sale in sales {
        for line in &sale.lines {
            let entry = by_product
                .entry(line.product_id)
                .or_insert_with(|| ProductSales {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: 0,
                    revenue: 0,
                });
            entry.quantity += line.quantity;
            entry.revenue += line.line_total();
        }
    }
    let mut ranked: Vec<ProductSales> = by_product.into_values().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}
