//! Historical sales reporting
//!
//! Every function takes a plain record slice; pass
//! [`UploadLog::combined`](crate::upload::UploadLog::combined) to include
//! uploads that have not been merged into the history yet.

use chrono::NaiveDate;
use demand_forecast::SaleRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Total quantity sold by one supermarket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupermarketTotal {
    pub supermarket: String,
    pub quantity_sold: f64,
}

/// Quantity sold in one category and its share of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub quantity_sold: f64,
    /// Percentage of all quantity sold
    pub share: f64,
}

/// Total quantity sold on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub quantity_sold: f64,
}

fn totals_by<K: Ord>(records: &[SaleRecord], key: impl Fn(&SaleRecord) -> K) -> BTreeMap<K, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0.0) += record.quantity_sold;
    }
    totals
}

/// Quantity sold per supermarket, largest first (ties by name)
pub fn sales_by_supermarket(records: &[SaleRecord]) -> Vec<SupermarketTotal> {
    let mut totals: Vec<SupermarketTotal> = totals_by(records, |r| r.supermarket.clone())
        .into_iter()
        .map(|(supermarket, quantity_sold)| SupermarketTotal {
            supermarket,
            quantity_sold,
        })
        .collect();
    // Stable sort keeps the name order for equal totals.
    totals.sort_by(|a, b| b.quantity_sold.total_cmp(&a.quantity_sold));
    totals
}

/// Quantity sold per category with percentage shares, sorted by category.
///
/// Records without a category are grouped under "Uncategorized".
pub fn sales_by_category(records: &[SaleRecord]) -> Vec<CategoryShare> {
    let totals = totals_by(records, |r| {
        let category = r.category.trim();
        if category.is_empty() {
            "Uncategorized".to_string()
        } else {
            category.to_string()
        }
    });
    let grand_total: f64 = totals.values().sum();

    totals
        .into_iter()
        .map(|(category, quantity_sold)| CategoryShare {
            share: if grand_total > 0.0 {
                quantity_sold / grand_total * 100.0
            } else {
                0.0
            },
            category,
            quantity_sold,
        })
        .collect()
}

/// Quantity sold per date, ascending
pub fn daily_totals(records: &[SaleRecord]) -> Vec<DailyTotal> {
    totals_by(records, |r| r.date)
        .into_iter()
        .map(|(date, quantity_sold)| DailyTotal {
            date,
            quantity_sold,
        })
        .collect()
}

/// Headline numbers for a set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub records: usize,
    pub total_quantity: f64,
    /// Mean of the per-date totals, zero when there are no records
    pub mean_daily_quantity: f64,
    pub supermarkets: usize,
    pub products: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SalesSummary {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let daily: Vec<f64> = daily_totals(records)
            .iter()
            .map(|d| d.quantity_sold)
            .collect();
        let supermarkets: BTreeSet<&str> =
            records.iter().map(|r| r.supermarket.as_str()).collect();
        let products: BTreeSet<&str> = records.iter().map(|r| r.product_name.as_str()).collect();

        Self {
            records: records.len(),
            total_quantity: retail_math::sum(&daily),
            mean_daily_quantity: retail_math::mean(&daily).unwrap_or(0.0),
            supermarkets: supermarkets.len(),
            products: products.len(),
            first_date: records.iter().map(|r| r.date).min(),
            last_date: records.iter().map(|r| r.date).max(),
        }
    }
}
