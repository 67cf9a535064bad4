//! Seeded synthetic sales history
//!
//! Produces a plausible history (weekly rhythm, promotion lift, weather
//! effect, gaussian noise, periodic restocking) for every supermarket and
//! product listed in a [`DemoSpec`]. The same spec always yields the same rows.

use crate::{OpsError, Result};
use chrono::{Duration, NaiveDate};
use demand_forecast::encoding::weekday_name;
use demand_forecast::SaleRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const WEATHER: [(&str, f64); 4] = [
    ("Sunny", 1.0),
    ("Cloudy", 0.95),
    ("Rainy", 0.8),
    ("Stormy", 0.6),
];

/// A product stocked by every demo supermarket
#[derive(Debug, Clone, PartialEq)]
pub struct DemoProduct {
    pub name: String,
    pub category: String,
    pub price_per_kg: f64,
    /// Typical daily quantity without promotion
    pub base_demand: f64,
}

impl DemoProduct {
    pub fn new(name: &str, category: &str, price_per_kg: f64, base_demand: f64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            price_per_kg,
            base_demand,
        }
    }
}

/// What to generate
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSpec {
    pub start: NaiveDate,
    pub days: usize,
    pub seed: u64,
    pub supermarkets: Vec<String>,
    pub products: Vec<DemoProduct>,
}

impl Default for DemoSpec {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 60,
            seed: 42,
            supermarkets: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            products: vec![
                DemoProduct::new("Rice", "Grains", 2.4, 35.0),
                DemoProduct::new("Tomatoes", "Vegetables", 3.1, 22.0),
                DemoProduct::new("Apples", "Fruit", 2.8, 18.0),
                DemoProduct::new("Lentils", "Legumes", 4.2, 9.0),
            ],
        }
    }
}

fn weekday_factor(name: &str) -> f64 {
    match name {
        "Friday" => 1.15,
        "Saturday" => 1.3,
        "Sunday" => 1.2,
        _ => 1.0,
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Generate the history described by `spec`, ordered by date
pub fn generate_history(spec: &DemoSpec) -> Result<Vec<SaleRecord>> {
    if spec.days == 0 || spec.supermarkets.is_empty() || spec.products.is_empty() {
        return Err(OpsError::Validation(
            "Demo spec needs at least one day, supermarket and product".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| OpsError::Validation(format!("Invalid noise distribution: {}", e)))?;

    let pairs = spec.supermarkets.len() * spec.products.len();
    let mut stock: Vec<f64> = spec
        .supermarkets
        .iter()
        .flat_map(|_| spec.products.iter().map(|p| p.base_demand * 10.0))
        .collect();
    let mut records = Vec::with_capacity(spec.days * pairs);

    for day in 0..spec.days {
        let date = spec.start + Duration::days(day as i64);
        let day_name = weekday_name(date);
        let holiday = rng.gen_bool(0.05);
        let (weather, weather_factor) = WEATHER[rng.gen_range(0..WEATHER.len())];

        for (s, supermarket) in spec.supermarkets.iter().enumerate() {
            for (p, product) in spec.products.iter().enumerate() {
                let promotion = rng.gen_bool(0.3);
                let discount_rate = if promotion { rng.gen_range(0.05..0.3) } else { 0.0 };
                let discounted_price =
                    ((product.price_per_kg * (1.0 - discount_rate)) * 100.0).round() / 100.0;

                let mut expected = product.base_demand * weekday_factor(day_name) * weather_factor;
                if promotion {
                    expected *= 1.0 + 2.0 * discount_rate;
                }
                if holiday {
                    expected *= 1.25;
                }
                let jitter: f64 = noise.sample(&mut rng) * product.base_demand * 0.1;
                let wanted = (expected + jitter).max(0.0).round();

                let slot = s * spec.products.len() + p;
                let sold = wanted.min(stock[slot]);
                stock[slot] -= sold;
                // Restock every Monday or when the shelf runs low.
                if day_name == "Monday" || stock[slot] < product.base_demand {
                    stock[slot] += product.base_demand * 7.0;
                }

                records.push(SaleRecord {
                    supermarket: supermarket.clone(),
                    product_name: product.name.clone(),
                    category: product.category.clone(),
                    date,
                    quantity_sold: sold,
                    stock_quantity: stock[slot],
                    day_of_week: day_name.to_string(),
                    holiday: yes_no(holiday),
                    promotion: yes_no(promotion),
                    weather: weather.to_string(),
                    price_per_kg: product.price_per_kg,
                    discounted_price: discounted_price.min(product.price_per_kg),
                });
            }
        }
    }
    Ok(records)
}
