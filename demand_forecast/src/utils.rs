//! Utility functions for the demand_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of a train/test partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Number of rows held out for `n` rows at `test_ratio`
pub fn test_size(n: usize, test_ratio: f64) -> usize {
    (n as f64 * test_ratio).ceil() as usize
}

/// Randomly split `n` row indices into training and test sets.
///
/// A seeded permutation of `0..n` is drawn; its first `ceil(n * test_ratio)`
/// entries form the test set and the rest the training set. Both sets must
/// end up non-empty.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "test_ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }

    let n_test = test_size(n, test_ratio);
    if n_test == 0 || n_test >= n {
        return Err(ForecastError::ModelFit(format!(
            "Cannot split {} rows at test_ratio {}: one partition would be empty",
            n, test_ratio
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: permutation,
    })
}

/// The `horizon` calendar days following `last`, ascending
pub fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as i64)
        .map(|offset| {
            last.checked_add_signed(Duration::days(offset)).ok_or_else(|| {
                ForecastError::Data(format!("Date overflow {} days after {}", offset, last))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_size_rounds_up() {
        assert_eq!(test_size(25, 0.2), 5);
        assert_eq!(test_size(21, 0.2), 5);
        assert_eq!(test_size(20, 0.2), 4);
    }

    #[test]
    fn test_future_dates_cross_month() {
        let last = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let dates = future_dates(last, 3).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            ]
        );
    }
}
