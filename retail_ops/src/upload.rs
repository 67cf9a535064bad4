//! Append-only log of supplier uploads
//!
//! Rows are validated once, on entry. Nothing downstream re-checks them, so
//! the price invariant (`discounted_price <= price_per_kg`) holds for every
//! record the log ever hands out. A log can be saved to and reloaded from a
//! CSV file in the same layout as the sales history.

use crate::{OpsError, Result};
use demand_forecast::{DataLoader, SaleRecord};
use std::path::Path;
use tracing::{debug, info, warn};

/// Supplier-uploaded sale records for one session
#[derive(Debug, Clone, Default)]
pub struct UploadLog {
    records: Vec<SaleRecord>,
}

impl UploadLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a record, returning the new log length
    pub fn append(&mut self, record: SaleRecord) -> Result<usize> {
        if let Err(err) = validate(&record) {
            warn!(
                supermarket = %record.supermarket,
                product = %record.product_name,
                error = %err,
                "rejected upload"
            );
            return Err(err);
        }
        debug!(
            supermarket = %record.supermarket,
            product = %record.product_name,
            date = %record.date,
            "accepted upload"
        );
        self.records.push(record);
        Ok(self.records.len())
    }

    /// Uploaded records in submission order
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a saved log, re-validating every row. A missing file is an empty log.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut log = Self::new();
        if !path.exists() {
            return Ok(log);
        }
        for record in DataLoader::from_csv(path)? {
            log.append(record)?;
        }
        Ok(log)
    }

    /// Write the log as CSV with a header row
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DataLoader::to_csv(path, &self.records)?;
        Ok(())
    }

    /// Validate a record and add it to the log saved at `path`.
    ///
    /// The file is rewritten only after the record is accepted.
    pub fn append_to_csv<P: AsRef<Path>>(path: P, record: SaleRecord) -> Result<usize> {
        let path = path.as_ref();
        let mut log = Self::from_csv(path)?;
        let len = log.append(record)?;
        log.to_csv(path)?;
        info!(path = %path.display(), rows = len, "saved upload");
        Ok(len)
    }

    /// History followed by every upload, as a fresh vector
    pub fn combined(&self, history: &[SaleRecord]) -> Vec<SaleRecord> {
        history.iter().chain(&self.records).cloned().collect()
    }
}

/// Check the upload-time invariants of a sale record
pub fn validate(record: &SaleRecord) -> Result<()> {
    if record.supermarket.trim().is_empty() {
        return Err(OpsError::Validation("Supermarket is required".to_string()));
    }
    if record.product_name.trim().is_empty() {
        return Err(OpsError::Validation("Product name is required".to_string()));
    }
    if !(record.quantity_sold >= 0.0 && record.quantity_sold.is_finite()) {
        return Err(OpsError::Validation(format!(
            "Quantity sold must be a non-negative number, got {}",
            record.quantity_sold
        )));
    }
    if !(record.stock_quantity >= 0.0 && record.stock_quantity.is_finite()) {
        return Err(OpsError::Validation(format!(
            "Stock quantity must be a non-negative number, got {}",
            record.stock_quantity
        )));
    }
    if !(record.price_per_kg > 0.0 && record.price_per_kg.is_finite()) {
        return Err(OpsError::Validation(format!(
            "Price per kg must be positive, got {}",
            record.price_per_kg
        )));
    }
    if !(record.discounted_price > 0.0 && record.discounted_price.is_finite()) {
        return Err(OpsError::Validation(format!(
            "Discounted price must be positive, got {}",
            record.discounted_price
        )));
    }
    if record.discounted_price > record.price_per_kg {
        return Err(OpsError::Validation(format!(
            "Discounted price ({}) exceeds price per kg ({})",
            record.discounted_price, record.price_per_kg
        )));
    }
    Ok(())
}
