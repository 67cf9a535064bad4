use chrono::NaiveDate;
use demand_forecast::encoding::{EncodingTables, FeatureEncoder};
use demand_forecast::SaleRecord;
use retail_ops::{OpsError, UploadLog};
use rstest::rstest;

fn create_record(price: f64, discounted: f64) -> SaleRecord {
    SaleRecord {
        supermarket: "A".to_string(),
        product_name: "Rice".to_string(),
        category: "Grains".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        quantity_sold: 14.0,
        stock_quantity: 60.0,
        day_of_week: "Thursday".to_string(),
        holiday: "No".to_string(),
        promotion: "Yes".to_string(),
        weather: "Sunny".to_string(),
        price_per_kg: price,
        discounted_price: discounted,
    }
}

#[test]
fn test_append_accepts_valid_rows() {
    let mut log = UploadLog::new();
    assert!(log.is_empty());
    assert_eq!(log.append(create_record(3.0, 2.5)).unwrap(), 1);
    assert_eq!(log.append(create_record(3.0, 3.0)).unwrap(), 2);
    assert_eq!(log.len(), 2);
    assert_eq!(log.records()[0].discounted_price, 2.5);
}

#[rstest]
#[case(create_record(3.0, 3.5))]
#[case(create_record(0.0, 0.0))]
#[case(create_record(3.0, -1.0))]
#[case(SaleRecord { quantity_sold: -1.0, ..create_record(3.0, 2.0) })]
#[case(SaleRecord { supermarket: " ".to_string(), ..create_record(3.0, 2.0) })]
#[case(SaleRecord { product_name: String::new(), ..create_record(3.0, 2.0) })]
fn test_append_rejects_invalid_rows(#[case] record: SaleRecord) {
    let mut log = UploadLog::new();
    assert!(matches!(log.append(record), Err(OpsError::Validation(_))));
    assert!(log.is_empty());
}

#[test]
fn test_combined_keeps_history_first() {
    let history = vec![create_record(2.0, 1.0)];
    let mut log = UploadLog::new();
    log.append(create_record(3.0, 2.5)).unwrap();

    let combined = log.combined(&history);
    assert_eq!(combined.len(), 2);
    assert_eq!(combined[0].price_per_kg, 2.0);
    assert_eq!(combined[1].price_per_kg, 3.0);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_accepted_rows_have_non_negative_discount() {
    let mut log = UploadLog::new();
    for (price, discounted) in [(3.0, 2.5), (1.0, 1.0), (9.99, 0.01), (3.0, 3.5)] {
        let _ = log.append(create_record(price, discounted));
    }
    assert_eq!(log.len(), 3);

    let tables = EncodingTables::from_records(log.records());
    let encoder = FeatureEncoder::new(&tables);
    for record in log.records() {
        assert!(record.discount() >= 0.0);
        assert!(encoder.encode(record).unwrap().discount >= 0.0);
    }
}

#[test]
fn test_saved_log_only_grows_with_accepted_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uploads.csv");

    assert!(UploadLog::from_csv(&path).unwrap().is_empty());
    assert_eq!(UploadLog::append_to_csv(&path, create_record(3.0, 2.5)).unwrap(), 1);

    let rejected = UploadLog::append_to_csv(&path, create_record(3.0, 3.5));
    assert!(matches!(rejected, Err(OpsError::Validation(_))));

    let saved = UploadLog::from_csv(&path).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.records()[0], create_record(3.0, 2.5));

    assert_eq!(UploadLog::append_to_csv(&path, create_record(4.0, 4.0)).unwrap(), 2);
    assert_eq!(UploadLog::from_csv(&path).unwrap().len(), 2);
}

#[test]
fn test_rejected_first_upload_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uploads.csv");

    assert!(UploadLog::append_to_csv(&path, create_record(0.0, 0.0)).is_err());
    assert!(!path.exists());
}
