//! Trip insertion, deduplication and deletion.

use tracing::debug;

use crate::drivers::DriverRegistry;
use crate::error::{Result, StoreError};
use crate::locations::LocationRegistry;
use crate::records::{Trip, TripId};
use crate::sequence::IdSequence;
use crate::table::TableStore;

mod batch;
mod fields;

pub use batch::{BatchInsert, BatchSkip};
pub use fields::NewTrip;

/// Sequence key under which trip identifiers are tracked.
pub const TRIPS_SEQUENCE: &str = "trips";

/// Owns the trips table: identifier assignment and the uniqueness check.
#[derive(Debug, Clone)]
pub struct TripStore {
    table: TableStore<Trip>,
    sequence: IdSequence,
    drivers: DriverRegistry,
    locations: LocationRegistry,
}

impl TripStore {
    pub fn new(
        table: TableStore<Trip>,
        sequence: IdSequence,
        drivers: DriverRegistry,
        locations: LocationRegistry,
    ) -> Self {
        Self {
            table,
            sequence,
            drivers,
            locations,
        }
    }

    pub fn table(&self) -> &TableStore<Trip> {
        &self.table
    }

    /// Every trip in storage order.
    pub fn all(&self) -> Result<Vec<Trip>> {
        self.table.load_all()
    }

    /// Inserts one trip and returns its new identifier.
    ///
    /// Nothing is written when validation fails or when an identical trip
    /// already exists; an unseen driver is only registered once the trip is
    /// known to be new.
    pub fn insert(&self, trip: &NewTrip) -> Result<TripId> {
        let fields = trip.validate()?;
        let existing = self.table.load_all()?;

        let known_driver = self.drivers.lookup(&fields.driver)?;
        let pickup_loc_id = self.locations.resolve(&trip.pickup_loc_name)?;
        let dropoff_loc_id = self.locations.resolve(&trip.dropoff_loc_name)?;
        if pickup_loc_id.is_none() {
            debug!(location = %trip.pickup_loc_name, "pickup location not found; storing empty reference");
        }
        if dropoff_loc_id.is_none() {
            debug!(location = %trip.dropoff_loc_name, "dropoff location not found; storing empty reference");
        }

        let mut candidate = Trip {
            trip_id: TripId(0),
            driver_id: known_driver,
            pickup_datetime: fields.pickup_datetime,
            dropoff_datetime: fields.dropoff_datetime,
            passenger_count: fields.passenger_count,
            pickup_loc_id,
            dropoff_loc_id,
            trip_distance: fields.trip_distance,
            fare_amount: fields.fare_amount,
        };

        // An unregistered driver cannot have trips yet.
        if known_driver.is_some() {
            if let Some(duplicate) = existing.iter().find(|row| row.same_fields(&candidate)) {
                return Err(StoreError::DuplicateTrip(duplicate.trip_id));
            }
        }

        let driver_id = match known_driver {
            Some(driver_id) => driver_id,
            None => self.drivers.ensure_parsed(&fields.driver)?,
        };
        candidate.driver_id = Some(driver_id);
        candidate.trip_id = self.next_trip_id(&existing)?;

        // Mark first: a failed append may skip an id but never reissues one.
        self.sequence
            .record_issued(TRIPS_SEQUENCE, candidate.trip_id.get())?;
        self.table.append_row(&candidate)?;

        debug!(trip_id = candidate.trip_id.get(), driver_id = driver_id.get(), "inserted trip");
        Ok(candidate.trip_id)
    }

    /// Inserts every entry that can be inserted, in input order.
    ///
    /// Entries that cannot be read or are rejected by [`TripStore::insert`]
    /// are logged with their index and skipped; the batch itself never fails.
    pub fn insert_batch<'a, I>(&self, entries: I) -> BatchInsert
    where
        I: IntoIterator<Item = &'a serde_json::Value>,
    {
        let mut outcome = BatchInsert::default();
        for (index, entry) in entries.into_iter().enumerate() {
            let result = NewTrip::from_value(entry).and_then(|trip| self.insert(&trip));
            match result {
                Ok(trip_id) => outcome.trip_ids.push(trip_id),
                Err(error) => outcome.record_skip(index, error),
            }
        }
        outcome
    }

    /// Removes the trip carrying `trip_id`, keeping the order of the rest.
    pub fn delete(&self, trip_id: TripId) -> Result<()> {
        let trips = self.table.load_all()?;
        let before = trips.len();
        let remaining: Vec<Trip> = trips
            .into_iter()
            .filter(|trip| trip.trip_id != trip_id)
            .collect();

        if remaining.len() == before {
            return Err(StoreError::NotFound(trip_id));
        }

        self.table.rewrite_all(&remaining)?;
        debug!(trip_id = trip_id.get(), "deleted trip");
        Ok(())
    }

    fn next_trip_id(&self, existing: &[Trip]) -> Result<TripId> {
        let max_existing = existing
            .iter()
            .map(|trip| trip.trip_id.get())
            .max()
            .unwrap_or(0);
        let last_issued = self.sequence.last_issued(TRIPS_SEQUENCE)?;
        Ok(TripId(max_existing.max(last_issued) + 1))
    }
}
