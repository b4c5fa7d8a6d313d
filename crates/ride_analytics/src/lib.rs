//! Derived views over a ride database.
//!
//! This crate reads the tables owned by [`ride_store::RideDb`] and computes
//! the numbers behind trip reports: day-of-week averages, origin-destination
//! matrices and a denormalised export view.
//!
//! # Quick Start
//!
//! ```no_run
//! use ride_analytics::{generate_od_matrix, generate_statistics, DateWindow, StatKind};
//! use ride_store::{RideDb, StoreConfig};
//!
//! let db = RideDb::open(StoreConfig::new("data")).unwrap();
//!
//! let stats = generate_statistics(&db, "trip".parse::<StatKind>().unwrap()).unwrap();
//! let window = DateWindow::parse(&[Some("01-01-2024"), None]).unwrap();
//! let matrix = generate_od_matrix(&db, Some(&window)).unwrap();
//! println!("{stats:?} {:?}", matrix.average("Pine View", "Legazpi Village"));
//! ```
//!
//! # Architecture
//!
//! - [`stats`]: per-day-of-week averages sliced by trip, passenger count or driver
//! - [`od_matrix`]: average daily trips per (pickup, dropoff) pair
//! - [`export`]: the joined export view and its CSV/JSON/Parquet writers

pub mod error;
pub mod export;
pub mod od_matrix;
pub mod stats;

pub use error::AnalyticsError;
pub use export::{export_to_csv, export_to_json, export_to_parquet, export_view, ExportRow};
pub use od_matrix::{generate_od_matrix, od_matrix, DateWindow, OdMatrix};
pub use stats::{
    generate_statistics, per_day_of_week_average, per_driver_average,
    per_passenger_count_average, StatKind, Statistics, WeekdayAverages,
};
