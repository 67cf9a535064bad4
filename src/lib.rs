//! # Shelfcast
//!
//! `shelfcast_workspace` bundles the shelfcast crates behind one dependency:
//!
//! - [`forecast`]: per supermarket/product demand forecasting (`demand_forecast`)
//! - [`ops`]: uploads, stock view, reporting and demo data (`retail_ops`)
//! - [`math`]: shared statistics and error metrics (`retail_math`)
//!
//! ## Example
//!
//! ```
//! use shelfcast_workspace::forecast::{DemandForecaster, SalesSnapshot, SeriesKey};
//! use shelfcast_workspace::ops::demo::{generate_history, DemoSpec};
//!
//! let history = generate_history(&DemoSpec::default()).unwrap();
//! let snapshot = SalesSnapshot::new(history);
//! let outcome = DemandForecaster::default()
//!     .run(&snapshot, &SeriesKey::new("A", "Rice"))
//!     .unwrap();
//! assert_eq!(outcome.forecast().len(), 7);
//! ```

pub use demand_forecast as forecast;
pub use retail_math as math;
pub use retail_ops as ops;
