use std::fs;
use std::path::Path;

use ride_store::{RideDb, StoreConfig};
use tempfile::TempDir;

pub const LOCATIONS: &[(u64, &str)] = &[
    (1, "Pine View"),
    (2, "Legazpi Village"),
    (3, "Salcedo Village"),
];

/// Opens a database in a fresh temp directory with the reference locations
/// already in place. Keep the `TempDir` alive for the duration of the test.
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

/// Raw lines of a table file, header included.
pub fn table_lines(path: impl AsRef<Path>) -> Vec<String> {
    fs::read_to_string(path)
        .expect("table should be readable")
        .lines()
        .map(str::to_string)
        .collect()
}
