//! Denormalised export view and its writers.
//!
//! The view joins driver and location names onto every trip, ordered by
//! trip id, with driver name parts capitalised. Writers produce CSV, JSON or
//! Parquet files from it.

use std::collections::HashMap;
use std::path::Path;

use ride_store::timestamp::format_datetime;
use ride_store::{Driver, DriverId, LocationId, RideDb, Trip};
use serde::Serialize;

use crate::error::AnalyticsError;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// One trip with its references resolved to names. Unresolved names are
/// `None` and export as empty values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub driver_lastname: Option<String>,
    pub driver_givenname: Option<String>,
    pub pickup_datetime: String,
    pub dropoff_datetime: String,
    pub passenger_count: u32,
    pub pickup_loc_name: Option<String>,
    pub dropoff_loc_name: Option<String>,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

/// Column order of every export format.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "driver_lastname",
    "driver_givenname",
    "pickup_datetime",
    "dropoff_datetime",
    "passenger_count",
    "pickup_loc_name",
    "dropoff_loc_name",
    "trip_distance",
    "fare_amount",
];

/// Loads all three tables and builds the export view.
pub fn export_view(db: &RideDb) -> Result<Vec<ExportRow>, AnalyticsError> {
    let trips = db.trips().all()?;
    let drivers = db.drivers().all()?;
    let locations = db.locations().names()?;
    Ok(build_export_view(trips, &drivers, &locations))
}

pub fn build_export_view(
    mut trips: Vec<Trip>,
    drivers: &[Driver],
    location_names: &HashMap<LocationId, String>,
) -> Vec<ExportRow> {
    let drivers: HashMap<DriverId, &Driver> = drivers
        .iter()
        .map(|driver| (driver.driver_id, driver))
        .collect();
    let location = |id: Option<LocationId>| id.and_then(|id| location_names.get(&id)).cloned();

    trips.sort_by_key(|trip| trip.trip_id);
    trips
        .into_iter()
        .map(|trip| {
            let driver = trip.driver_id.and_then(|id| drivers.get(&id));
            ExportRow {
                driver_lastname: driver.map(|driver| capitalize(&driver.last_name)),
                driver_givenname: driver.map(|driver| capitalize(&driver.given_name)),
                pickup_datetime: format_datetime(&trip.pickup_datetime),
                dropoff_datetime: format_datetime(&trip.dropoff_datetime),
                passenger_count: trip.passenger_count,
                pickup_loc_name: location(trip.pickup_loc_id),
                dropoff_loc_name: location(trip.dropoff_loc_id),
                trip_distance: trip.trip_distance,
                fare_amount: trip.fare_amount,
            }
        })
        .collect()
}

/// First character upper case, the rest lower case.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Export the view to CSV with a header row.
///
/// # Errors
///
/// Returns an error if the view is empty or file creation or writing fails.
pub fn export_to_csv(rows: &[ExportRow], path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
    writer_utils::ensure_not_empty(rows)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(rows, file)
}

/// Export the view as a JSON array of objects. An empty view writes `[]`.
pub fn export_to_json(rows: &[ExportRow], path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(rows, file)
}

/// Export the view to a Parquet file.
///
/// # Errors
///
/// Returns an error if the view is empty or file creation or Parquet
/// writing fails.
pub fn export_to_parquet(
    rows: &[ExportRow],
    path: impl AsRef<Path>,
) -> Result<(), AnalyticsError> {
    writer_utils::ensure_not_empty(rows)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_to_parquet_impl(rows, file)
}
