#![allow(dead_code)]

use std::fs;

use ride_store::{NewTrip, RideDb, StoreConfig, TripId};
use tempfile::TempDir;

pub const LOCATIONS: &[(u64, &str)] = &[
    (1, "Pine View"),
    (2, "Legazpi Village"),
    (3, "Salcedo Village"),
];

/// Fresh database in a temp directory with the reference locations seeded.
pub fn open_seeded_db() -> (TempDir, RideDb) {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let config = StoreConfig::new(dir.path());

    let mut locations = String::from("location_id,loc_name\n");
    for (id, name) in LOCATIONS {
        locations.push_str(&format!("{id},{name}\n"));
    }
    fs::write(config.locations_path(), locations).expect("locations fixture should be written");

    let db = RideDb::open(config).expect("db should open");
    (dir, db)
}

/// Inserts a trip picked up at `pickup` (`hh:mm:ss,dd-mm-yyyy`).
pub fn add_trip(
    db: &RideDb,
    driver: &str,
    pickup: &str,
    passengers: i64,
    from: &str,
    to: &str,
) -> TripId {
    db.add_trip(&NewTrip {
        driver: driver.to_string(),
        pickup_datetime: pickup.to_string(),
        dropoff_datetime: pickup.to_string(),
        passenger_count: passengers,
        pickup_loc_name: from.to_string(),
        dropoff_loc_name: to.to_string(),
        trip_distance: 2500.0,
        fare_amount: 150.0,
    })
    .expect("trip should insert")
}
