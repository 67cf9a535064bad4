//! Feature encoding for sale records
//!
//! Categorical labels are mapped to numeric codes through [`CategoryTable`]s
//! built once per sales snapshot. The same tables encode the history and
//! synthesize future feature vectors, so a code always means the same label
//! within one forecast request.

use crate::data::SaleRecord;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;

/// Canonical English weekday names
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Column names of the feature matrix, in order
pub const FEATURE_NAMES: [&str; 5] = [
    "day_of_week_code",
    "holiday",
    "promotion",
    "weather_code",
    "discount",
];

/// Label to code mapping. Codes follow the lexicographic order of the labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    labels: Vec<String>,
}

impl CategoryTable {
    /// Build a table from any collection of labels; duplicates collapse
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { labels }
    }

    /// Code assigned to a label, if the label is known
    pub fn code(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|l| l.as_str().cmp(label.trim()))
            .ok()
    }

    /// Label for a code, if the code is in range
    pub fn label(&self, code: usize) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// Labels in code order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Canonical weekday name of a calendar date
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// Normalize a day-of-week label ("mon", "MONDAY", ...) to its canonical name
pub fn canonical_weekday(label: &str) -> Result<&'static str> {
    let weekday: Weekday = label.trim().parse().map_err(|_| {
        ForecastError::DataIntegrity(format!("Unrecognized day_of_week label '{}'", label))
    })?;
    Ok(WEEKDAY_NAMES[weekday.num_days_from_monday() as usize])
}

/// Map a Yes/No label to 1.0/0.0
pub fn parse_flag(field: &str, label: &str) -> Result<f64> {
    match label.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(1.0),
        "no" => Ok(0.0),
        _ => Err(ForecastError::DataIntegrity(format!(
            "Unexpected {} label '{}', expected Yes or No",
            field, label
        ))),
    }
}

/// Category tables for one sales snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingTables {
    pub day_of_week: CategoryTable,
    pub weather: CategoryTable,
}

impl EncodingTables {
    /// Build tables from every record of a snapshot.
    ///
    /// The day-of-week table always holds the seven weekday names, so any
    /// future date can be encoded. Labels are not validated here; a record
    /// with a bad label fails when it is encoded, which only affects the
    /// series it belongs to.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let weather: Vec<&str> = records.into_iter().map(|r| r.weather.as_str()).collect();
        Self {
            day_of_week: CategoryTable::from_labels(WEEKDAY_NAMES),
            weather: CategoryTable::from_labels(weather),
        }
    }

    /// Code for the weekday of a calendar date
    pub fn day_code_for_date(&self, date: NaiveDate) -> Result<usize> {
        let name = weekday_name(date);
        self.day_of_week.code(name).ok_or_else(|| {
            ForecastError::DataIntegrity(format!("Missing day_of_week category '{}'", name))
        })
    }
}

/// Numeric covariates of one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub day_of_week_code: f64,
    pub holiday: f64,
    pub promotion: f64,
    pub weather_code: f64,
    pub discount: f64,
}

impl FeatureVector {
    /// Columns in [`FEATURE_NAMES`] order
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.day_of_week_code,
            self.holiday,
            self.promotion,
            self.weather_code,
            self.discount,
        ]
    }
}

/// Encodes sale records against a fixed set of tables
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'a> {
    tables: &'a EncodingTables,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(tables: &'a EncodingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &EncodingTables {
        self.tables
    }

    /// Encode one historical record
    pub fn encode(&self, record: &SaleRecord) -> Result<FeatureVector> {
        let day = canonical_weekday(&record.day_of_week)?;
        let day_code = self.tables.day_of_week.code(day).ok_or_else(|| {
            ForecastError::DataIntegrity(format!("Missing day_of_week category '{}'", day))
        })?;
        let weather_code = self.tables.weather.code(&record.weather).ok_or_else(|| {
            ForecastError::DataIntegrity(format!(
                "Missing weather category '{}'",
                record.weather
            ))
        })?;

        Ok(FeatureVector {
            day_of_week_code: day_code as f64,
            holiday: parse_flag("holiday", &record.holiday)?,
            promotion: parse_flag("promotion", &record.promotion)?,
            weather_code: weather_code as f64,
            discount: record.discount(),
        })
    }

    /// Encode a series of records in order
    pub fn encode_all<'r, I>(&self, records: I) -> Result<Vec<FeatureVector>>
    where
        I: IntoIterator<Item = &'r SaleRecord>,
    {
        records.into_iter().map(|r| self.encode(r)).collect()
    }

    /// Covariates assumed for a future date: no holiday, active promotion,
    /// baseline weather and the given discount.
    pub fn future(&self, date: NaiveDate, discount: f64) -> Result<FeatureVector> {
        Ok(FeatureVector {
            day_of_week_code: self.tables.day_code_for_date(date)? as f64,
            holiday: 0.0,
            promotion: 1.0,
            weather_code: 0.0,
            discount,
        })
    }
}
