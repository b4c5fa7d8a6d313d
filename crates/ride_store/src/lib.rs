//! Flat-table record store for ride-hailing trips.
//!
//! Three related tables back the store: drivers, locations and trips. Each
//! table is a CSV file whose header row is its schema. The store resolves
//! driver and location names to identifiers, assigns trip identifiers,
//! rejects duplicate trips, deletes by identifier, and answers exact-match
//! and inclusive-range searches over the trips table.
//!
//! # Quick Start
//!
//! ```no_run
//! use ride_store::{Match, NewTrip, RideDb, StoreConfig, TripQuery};
//!
//! let db = RideDb::open(StoreConfig::new("data")).unwrap();
//!
//! let trip_id = db
//!     .add_trip(&NewTrip {
//!         driver: "Dela Cruz, Juan".to_string(),
//!         pickup_datetime: "08:15:00,01-01-2024".to_string(),
//!         dropoff_datetime: "08:40:00,01-01-2024".to_string(),
//!         passenger_count: 2,
//!         pickup_loc_name: "Pine View".to_string(),
//!         dropoff_loc_name: "Legazpi Village".to_string(),
//!         trip_distance: 5400.0,
//!         fare_amount: 210.0,
//!     })
//!     .unwrap();
//!
//! let query = TripQuery::new().passenger_count(Match::between(2, 4));
//! let trips = db.search_trips(&query).unwrap();
//! assert!(trips.iter().any(|trip| trip.trip_id == trip_id));
//! ```
//!
//! # Architecture
//!
//! - [`table`]: generic read-all / append / rewrite-all over one CSV table
//! - [`drivers`], [`locations`]: name to identifier registries
//! - [`sequence`]: persisted identifier high-water marks
//! - [`trips`]: trip insertion (single and batch) and deletion
//! - [`query`]: criteria model and the search engine
//! - [`db`]: the [`RideDb`] handle that owns every table of one data directory

pub mod config;
pub mod db;
pub mod drivers;
pub mod error;
pub mod locations;
pub mod query;
pub mod records;
pub mod sequence;
pub mod table;
pub mod timestamp;
pub mod trips;

pub use config::StoreConfig;
pub use db::RideDb;
pub use drivers::{DriverName, DriverRegistry};
pub use error::{Result, StoreError};
pub use locations::LocationRegistry;
pub use query::{Criterion, Match, TripField, TripQuery};
pub use records::{Driver, DriverId, Location, LocationId, Trip, TripId};
pub use table::{TableRow, TableStore};
pub use trips::{BatchInsert, BatchSkip, NewTrip, TripStore};
