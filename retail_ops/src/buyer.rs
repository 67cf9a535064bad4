//! Buyer-facing stock view and purchase simulation

use crate::{OpsError, Result};
use chrono::NaiveDate;
use demand_forecast::{SaleRecord, SeriesKey};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Latest known stock of one product at a supermarket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockLevel {
    pub product_name: String,
    pub category: String,
    pub stock_quantity: f64,
    pub as_of: NaiveDate,
    pub low_stock: bool,
}

/// Result of a simulated purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// Enough stock; this much would remain afterwards
    Fulfilled { remaining: f64 },
    /// Not enough stock; this much is on hand
    InsufficientStock { available: f64 },
}

fn latest<'a>(records: impl Iterator<Item = &'a SaleRecord>) -> Option<&'a SaleRecord> {
    // Later rows win ties so that fresh uploads override history.
    records.fold(None, |best: Option<&SaleRecord>, record| match best {
        Some(b) if b.date > record.date => Some(b),
        _ => Some(record),
    })
}

/// Stock per product at one supermarket, taken from each product's latest record
pub fn stock_levels(
    records: &[SaleRecord],
    supermarket: &str,
    low_stock_threshold: f64,
) -> Vec<StockLevel> {
    let mut by_product: BTreeMap<&str, Vec<&SaleRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.supermarket == supermarket) {
        by_product
            .entry(record.product_name.as_str())
            .or_default()
            .push(record);
    }

    by_product
        .into_values()
        .filter_map(|rows| latest(rows.into_iter()))
        .map(|r| StockLevel {
            product_name: r.product_name.clone(),
            category: r.category.clone(),
            stock_quantity: r.stock_quantity,
            as_of: r.date,
            low_stock: r.stock_quantity < low_stock_threshold,
        })
        .collect()
}

/// Check whether `quantity` units of a product could be bought right now.
///
/// Reads the latest stock for the pair and never changes any record.
pub fn simulate_purchase(
    records: &[SaleRecord],
    key: &SeriesKey,
    quantity: f64,
) -> Result<PurchaseOutcome> {
    if !(quantity > 0.0 && quantity.is_finite()) {
        return Err(OpsError::Validation(format!(
            "Purchase quantity must be positive, got {}",
            quantity
        )));
    }

    let record = latest(records.iter().filter(|r| r.matches(key)))
        .ok_or_else(|| OpsError::NotFound(format!("No stock records for {}", key)))?;

    let outcome = if quantity <= record.stock_quantity {
        PurchaseOutcome::Fulfilled {
            remaining: record.stock_quantity - quantity,
        }
    } else {
        PurchaseOutcome::InsufficientStock {
            available: record.stock_quantity,
        }
    };
    info!(%key, quantity, ?outcome, "simulated purchase");
    Ok(outcome)
}
