//! Sales history handling for forecasting

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One historical day of sales for a product at a supermarket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Supermarket identifier
    pub supermarket: String,
    /// Product identifier
    pub product_name: String,
    /// Product category
    #[serde(default)]
    pub category: String,
    /// Calendar date of the sale
    pub date: NaiveDate,
    /// Units (kg) sold on that date
    pub quantity_sold: f64,
    /// Units left on hand after the day
    #[serde(default)]
    pub stock_quantity: f64,
    /// Day-of-week label, e.g. "Monday"
    pub day_of_week: String,
    /// Holiday label, "Yes" or "No"
    pub holiday: String,
    /// Promotion label, "Yes" or "No"
    pub promotion: String,
    /// Weather label
    pub weather: String,
    /// List price
    pub price_per_kg: f64,
    /// Price after discount
    pub discounted_price: f64,
}

impl SaleRecord {
    /// Price reduction applied on this day
    pub fn discount(&self) -> f64 {
        self.price_per_kg - self.discounted_price
    }

    /// The (supermarket, product) pair this record belongs to
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(&self.supermarket, &self.product_name)
    }

    /// Whether this record belongs to the given pair
    pub fn matches(&self, key: &SeriesKey) -> bool {
        self.supermarket == key.supermarket && self.product_name == key.product_name
    }
}

/// Identifies one demand series
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub supermarket: String,
    pub product_name: String,
}

impl SeriesKey {
    pub fn new(supermarket: &str, product_name: &str) -> Self {
        Self {
            supermarket: supermarket.to_string(),
            product_name: product_name.to_string(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.supermarket, self.product_name)
    }
}

/// Read-only snapshot of the sales history handed to the forecaster
#[derive(Debug, Clone, Default)]
pub struct SalesSnapshot {
    records: Vec<SaleRecord>,
}

impl SalesSnapshot {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one pair, ordered by date.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    pub fn series(&self, key: &SeriesKey) -> Vec<&SaleRecord> {
        let mut series: Vec<&SaleRecord> =
            self.records.iter().filter(|r| r.matches(key)).collect();
        series.sort_by_key(|r| r.date);
        series
    }

    /// Distinct pairs present in the snapshot, sorted
    pub fn keys(&self) -> Vec<SeriesKey> {
        self.records
            .iter()
            .map(SaleRecord::key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<SaleRecord>> for SalesSnapshot {
    fn from(records: Vec<SaleRecord>) -> Self {
        Self::new(records)
    }
}

/// Data loader for sales history
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sale records from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let records = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = records.len(), "loaded sales history");
        Ok(records)
    }

    /// Load sale records from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Load a CSV file straight into a snapshot
    pub fn snapshot_from_csv<P: AsRef<Path>>(path: P) -> Result<SalesSnapshot> {
        Ok(SalesSnapshot::new(Self::from_csv(path)?))
    }

    /// Write sale records as CSV with a header row
    pub fn to_csv<P: AsRef<Path>>(path: P, records: &[SaleRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(supermarket: &str, product: &str, date: &str) -> SaleRecord {
        SaleRecord {
            supermarket: supermarket.to_string(),
            product_name: product.to_string(),
            category: "Grains".to_string(),
            date: date.parse().unwrap(),
            quantity_sold: 10.0,
            stock_quantity: 100.0,
            day_of_week: "Monday".to_string(),
            holiday: "No".to_string(),
            promotion: "No".to_string(),
            weather: "Sunny".to_string(),
            price_per_kg: 2.0,
            discounted_price: 1.5,
        }
    }

    #[test]
    fn test_series_is_filtered_and_sorted() {
        let snapshot = SalesSnapshot::new(vec![
            record("A", "Rice", "2024-01-03"),
            record("B", "Rice", "2024-01-01"),
            record("A", "Rice", "2024-01-01"),
            record("A", "Beans", "2024-01-02"),
        ]);

        let series = snapshot.series(&SeriesKey::new("A", "Rice"));
        let dates: Vec<String> = series.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
    }

    #[test]
    fn test_keys_are_distinct_and_sorted() {
        let snapshot = SalesSnapshot::new(vec![
            record("B", "Rice", "2024-01-01"),
            record("A", "Rice", "2024-01-01"),
            record("A", "Rice", "2024-01-02"),
        ]);
        assert_eq!(
            snapshot.keys(),
            vec![SeriesKey::new("A", "Rice"), SeriesKey::new("B", "Rice")]
        );
    }

    #[test]
    fn test_discount() {
        assert_eq!(record("A", "Rice", "2024-01-01").discount(), 0.5);
    }
}
