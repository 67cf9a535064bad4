use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use demand_forecast::encoding::weekday_name;
use demand_forecast::{
    DataLoader, DemandForecaster, ForecastOutcome, ForecastReport, SaleRecord, SalesSnapshot,
    SeriesKey,
};
use retail_ops::analytics::{sales_by_category, sales_by_supermarket, SalesSummary};
use retail_ops::buyer::{simulate_purchase, stock_levels, PurchaseOutcome};
use retail_ops::demo::{generate_history, DemoSpec};
use retail_ops::logging::init_tracing;
use retail_ops::{AppConfig, UploadLog};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[clap(about, version, name = "shelfcast")]
struct Cli {
    /// Optional TOML configuration file
    #[clap(long, global = true, env = "SHELFCAST_CONFIG")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forecast demand for one supermarket and product
    Forecast {
        #[clap(flatten)]
        input: Input,
        #[clap(long)]
        supermarket: String,
        #[clap(long)]
        product: String,
        /// Print the full report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Sales totals per supermarket and category
    Report {
        #[clap(flatten)]
        input: Input,
    },
    /// Current stock at a supermarket
    Stock {
        #[clap(flatten)]
        input: Input,
        #[clap(long)]
        supermarket: String,
    },
    /// Check whether a purchase could be fulfilled
    Purchase {
        #[clap(flatten)]
        input: Input,
        #[clap(long)]
        supermarket: String,
        #[clap(long)]
        product: String,
        #[clap(long)]
        quantity: f64,
    },
    /// Validate a supplier row and append it to an uploads file
    Upload {
        /// Uploads CSV, created on the first accepted row
        #[clap(long)]
        uploads: PathBuf,
        #[clap(flatten)]
        row: UploadRow,
    },
    /// Write a synthetic sales history
    Demo {
        #[clap(long)]
        out: PathBuf,
        #[clap(long, default_value_t = 60)]
        days: usize,
        #[clap(long, default_value_t = 42)]
        seed: u64,
    },
}

/// Sales history plus optional supplier uploads
#[derive(Debug, Args)]
struct Input {
    /// Sales history CSV
    #[clap(long)]
    data: PathBuf,
    /// Uploads CSV merged after the history
    #[clap(long)]
    uploads: Option<PathBuf>,
}

impl Input {
    fn load(&self) -> Result<Vec<SaleRecord>, Box<dyn std::error::Error>> {
        let history = DataLoader::from_csv(&self.data)?;
        match &self.uploads {
            Some(path) => Ok(UploadLog::from_csv(path)?.combined(&history)),
            None => Ok(history),
        }
    }
}

#[derive(Debug, Args)]
struct UploadRow {
    #[clap(long)]
    supermarket: String,
    #[clap(long)]
    product: String,
    #[clap(long, default_value = "")]
    category: String,
    /// Sale date, YYYY-MM-DD
    #[clap(long)]
    date: NaiveDate,
    #[clap(long)]
    quantity_sold: f64,
    #[clap(long, default_value_t = 0.0)]
    stock_quantity: f64,
    /// Defaults to the weekday of `--date`
    #[clap(long)]
    day_of_week: Option<String>,
    #[clap(long, default_value = "No")]
    holiday: String,
    #[clap(long, default_value = "No")]
    promotion: String,
    #[clap(long)]
    weather: String,
    #[clap(long)]
    price_per_kg: f64,
    #[clap(long)]
    discounted_price: f64,
}

impl From<UploadRow> for SaleRecord {
    fn from(row: UploadRow) -> Self {
        SaleRecord {
            day_of_week: row
                .day_of_week
                .unwrap_or_else(|| weekday_name(row.date).to_string()),
            supermarket: row.supermarket,
            product_name: row.product,
            category: row.category,
            date: row.date,
            quantity_sold: row.quantity_sold,
            stock_quantity: row.stock_quantity,
            holiday: row.holiday,
            promotion: row.promotion,
            weather: row.weather,
            price_per_kg: row.price_per_kg,
            discounted_price: row.discounted_price,
        }
    }
}

fn print_report(report: &ForecastReport) {
    println!("Forecast for {}", report.key);
    println!("==================================");
    println!(
        "  Test RMSE: {:.2} ({} train rows, {} test rows)",
        report.rmse,
        report.train_rows,
        report.test_rows()
    );
    println!(
        "  Test MAE: {:.2}, MSE: {:.2}",
        report.accuracy.mae, report.accuracy.mse
    );
    println!("  Assumed discount: {:.2}", report.assumed_discount);
    println!();
    println!("  Actual vs predicted (test rows):");
    for point in &report.evaluation {
        println!(
            "    {}  actual {:>8.1}  predicted {:>8.1}",
            point.date, point.actual, point.predicted
        );
    }
    println!();
    println!("  Next {} days:", report.forecast.len());
    for point in &report.forecast {
        println!("    {}  {:>8.1}", point.date, point.predicted_quantity);
    }
    if report.high_demand {
        println!();
        println!(
            "  High demand expected: predictions exceed {:.0} units. Consider restocking.",
            report.high_demand_threshold
        );
    }
}

fn run(cli: Cli, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Forecast {
            input,
            supermarket,
            product,
            json,
        } => {
            let snapshot = SalesSnapshot::new(input.load()?);
            let forecaster = DemandForecaster::new(config.forecast)?;
            let outcome = forecaster.run(&snapshot, &SeriesKey::new(&supermarket, &product))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            match outcome {
                ForecastOutcome::Forecast(report) => print_report(&report),
                ForecastOutcome::InsufficientData {
                    key,
                    available,
                    required,
                } => println!(
                    "Not enough data to forecast {}: {} records, need at least {}.",
                    key, available, required
                ),
            }
        }
        Command::Report { input } => {
            let records = input.load()?;
            let summary = SalesSummary::from_records(&records);
            println!(
                "{} records, {} supermarkets, {} products, total quantity {:.1}",
                summary.records, summary.supermarkets, summary.products, summary.total_quantity
            );
            if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
                println!(
                    "{} to {}, {:.1} per day on average",
                    first, last, summary.mean_daily_quantity
                );
            }
            println!();
            println!("Sales by supermarket:");
            for total in sales_by_supermarket(&records) {
                println!("  {:<20} {:>10.1}", total.supermarket, total.quantity_sold);
            }
            println!();
            println!("Sales by category:");
            for share in sales_by_category(&records) {
                println!(
                    "  {:<20} {:>10.1} {:>6.1}%",
                    share.category, share.quantity_sold, share.share
                );
            }
        }
        Command::Stock { input, supermarket } => {
            let records = input.load()?;
            let levels = stock_levels(&records, &supermarket, config.low_stock_threshold);
            if levels.is_empty() {
                println!("No stock records for {}", supermarket);
            }
            for level in levels {
                println!(
                    "  {:<20} {:>8.1} (as of {}){}",
                    level.product_name,
                    level.stock_quantity,
                    level.as_of,
                    if level.low_stock { "  LOW STOCK" } else { "" }
                );
            }
        }
        Command::Purchase {
            input,
            supermarket,
            product,
            quantity,
        } => {
            let records = input.load()?;
            let key = SeriesKey::new(&supermarket, &product);
            match simulate_purchase(&records, &key, quantity)? {
                PurchaseOutcome::Fulfilled { remaining } => {
                    println!(
                        "Purchase of {} from {} succeeds, {:.1} left",
                        quantity, key, remaining
                    )
                }
                PurchaseOutcome::InsufficientStock { available } => {
                    println!(
                        "Cannot buy {} from {}: only {:.1} in stock",
                        quantity, key, available
                    )
                }
            }
        }
        Command::Upload { uploads, row } => {
            let record = SaleRecord::from(row);
            let key = record.key();
            let rows = UploadLog::append_to_csv(&uploads, record)?;
            println!(
                "Accepted upload for {}; {} now holds {} rows",
                key,
                uploads.display(),
                rows
            );
        }
        Command::Demo { out, days, seed } => {
            let spec = DemoSpec {
                days,
                seed,
                ..DemoSpec::default()
            };
            let records = generate_history(&spec)?;
            DataLoader::to_csv(&out, &records)?;
            println!("Wrote {} records to {}", records.len(), out.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!("failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
