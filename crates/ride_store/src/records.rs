//! Row types of the persisted tables.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::table::TableRow;
use crate::timestamp::serde_datetime;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier assigned by the driver registry.
    DriverId
);
record_id!(
    /// Identifier of a row in the read-only locations table.
    LocationId
);
record_id!(
    /// Identifier assigned by the trip store; never reused after deletion.
    TripId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: DriverId,
    pub given_name: String,
    pub last_name: String,
}

impl Driver {
    /// "Last, Given" as used for lookups and per-driver statistics.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.given_name)
    }
}

impl TableRow for Driver {
    const COLUMNS: &'static [&'static str] = &["driver_id", "given_name", "last_name"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: LocationId,
    pub loc_name: String,
}

impl TableRow for Location {
    const COLUMNS: &'static [&'static str] = &["location_id", "loc_name"];
}

/// One row of the trips table.
///
/// Driver and location references are optional: a row written while a
/// location name was unknown carries an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: TripId,
    pub driver_id: Option<DriverId>,
    #[serde(with = "serde_datetime")]
    pub pickup_datetime: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub dropoff_datetime: NaiveDateTime,
    pub passenger_count: u32,
    pub pickup_loc_id: Option<LocationId>,
    pub dropoff_loc_id: Option<LocationId>,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

impl Trip {
    /// Compares every field except `trip_id`.
    pub fn same_fields(&self, other: &Trip) -> bool {
        self.driver_id == other.driver_id
            && self.pickup_datetime == other.pickup_datetime
            && self.dropoff_datetime == other.dropoff_datetime
            && self.passenger_count == other.passenger_count
            && self.pickup_loc_id == other.pickup_loc_id
            && self.dropoff_loc_id == other.dropoff_loc_id
            && self.trip_distance == other.trip_distance
            && self.fare_amount == other.fare_amount
    }
}

impl TableRow for Trip {
    const COLUMNS: &'static [&'static str] = &[
        "trip_id",
        "driver_id",
        "pickup_datetime",
        "dropoff_datetime",
        "passenger_count",
        "pickup_loc_id",
        "dropoff_loc_id",
        "trip_distance",
        "fare_amount",
    ];
}

/// Last identifier issued for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRow {
    pub table_name: String,
    pub last_id: u64,
}

impl TableRow for SequenceRow {
    const COLUMNS: &'static [&'static str] = &["table_name", "last_id"];
}
