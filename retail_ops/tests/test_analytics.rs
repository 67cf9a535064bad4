use chrono::NaiveDate;
use demand_forecast::SaleRecord;
use pretty_assertions::assert_eq;
use retail_ops::analytics::{daily_totals, sales_by_category, sales_by_supermarket, SalesSummary};
use retail_ops::UploadLog;

fn create_record(
    supermarket: &str,
    product: &str,
    category: &str,
    day: u32,
    quantity: f64,
) -> SaleRecord {
    let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
    SaleRecord {
        supermarket: supermarket.to_string(),
        product_name: product.to_string(),
        category: category.to_string(),
        date,
        quantity_sold: quantity,
        stock_quantity: 50.0,
        day_of_week: demand_forecast::encoding::weekday_name(date).to_string(),
        holiday: "No".to_string(),
        promotion: "No".to_string(),
        weather: "Sunny".to_string(),
        price_per_kg: 2.0,
        discounted_price: 2.0,
    }
}

fn create_history() -> Vec<SaleRecord> {
    vec![
        create_record("A", "Rice", "Grains", 1, 10.0),
        create_record("A", "Apples", "Fruit", 1, 5.0),
        create_record("B", "Rice", "Grains", 2, 30.0),
        create_record("C", "Apples", "Fruit", 2, 15.0),
        create_record("C", "Lentils", "", 3, 5.0),
    ]
}

#[test]
fn test_sales_by_supermarket_sorted_descending() {
    let totals = sales_by_supermarket(&create_history());
    let names: Vec<&str> = totals.iter().map(|t| t.supermarket.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
    assert_eq!(totals[0].quantity_sold, 30.0);
    assert_eq!(totals[1].quantity_sold, 20.0);
    assert_eq!(totals[2].quantity_sold, 15.0);
}

#[test]
fn test_ties_are_ordered_by_name() {
    let records = vec![
        create_record("Z", "Rice", "Grains", 1, 10.0),
        create_record("M", "Rice", "Grains", 1, 10.0),
    ];
    let names: Vec<String> = sales_by_supermarket(&records)
        .into_iter()
        .map(|t| t.supermarket)
        .collect();
    assert_eq!(names, vec!["M".to_string(), "Z".to_string()]);
}

#[test]
fn test_sales_by_category_shares() {
    let shares = sales_by_category(&create_history());
    let categories: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, vec!["Fruit", "Grains", "Uncategorized"]);

    assert!((shares[0].share - 20.0 / 65.0 * 100.0).abs() < 1e-9);
    assert!((shares[1].share - 40.0 / 65.0 * 100.0).abs() < 1e-9);
    let total_share: f64 = shares.iter().map(|s| s.share).sum();
    assert!((total_share - 100.0).abs() < 1e-9);
}

#[test]
fn test_daily_totals_ascending() {
    let mut records = create_history();
    records.reverse();
    let totals = daily_totals(&records);
    let values: Vec<f64> = totals.iter().map(|d| d.quantity_sold).collect();
    assert_eq!(values, vec![15.0, 45.0, 5.0]);
    assert!(totals.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_summary_includes_uploads() {
    let history = create_history();
    let mut uploads = UploadLog::new();
    uploads
        .append(create_record("D", "Rice", "Grains", 4, 8.0))
        .unwrap();

    let summary = SalesSummary::from_records(&uploads.combined(&history));
    assert_eq!(summary.records, 6);
    assert_eq!(summary.supermarkets, 4);
    assert_eq!(summary.products, 3);
    assert_eq!(summary.total_quantity, 73.0);
    assert!((summary.mean_daily_quantity - 73.0 / 4.0).abs() < 1e-9);
    assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 5, 4));
}

#[test]
fn test_empty_inputs() {
    assert!(sales_by_supermarket(&[]).is_empty());
    assert!(sales_by_category(&[]).is_empty());
    let summary = SalesSummary::from_records(&[]);
    assert_eq!(summary.records, 0);
    assert_eq!(summary.mean_daily_quantity, 0.0);
    assert_eq!(summary.first_date, None);
}
