//! Handle over one data directory.

use std::fs;

use serde_json::Value;
use tracing::info;

use crate::config::StoreConfig;
use crate::drivers::DriverRegistry;
use crate::error::{Result, StoreError};
use crate::locations::LocationRegistry;
use crate::query::TripQuery;
use crate::records::{Trip, TripId};
use crate::sequence::IdSequence;
use crate::table::TableStore;
use crate::trips::{BatchInsert, NewTrip, TripStore};

/// Owns the tables of one data directory and exposes the store operations.
///
/// Every call reads or writes whole tables; nothing is cached between calls.
/// Mutations are not synchronised, so concurrent writers must be serialised
/// by the caller.
#[derive(Debug, Clone)]
pub struct RideDb {
    config: StoreConfig,
    drivers: DriverRegistry,
    locations: LocationRegistry,
    trips: TripStore,
}

impl RideDb {
    /// Opens (and if needed creates) the tables described by `config`.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)
            .map_err(|error| StoreError::io(&config.data_dir, error))?;

        let drivers = DriverRegistry::new(config.drivers_path());
        let locations = LocationRegistry::new(config.locations_path());
        let sequence = IdSequence::new(config.sequences_path());
        let trips = TripStore::new(
            TableStore::new(config.trips_path()),
            sequence.clone(),
            drivers.clone(),
            locations.clone(),
        );

        drivers.table().ensure()?;
        locations.table().ensure()?;
        trips.table().ensure()?;
        sequence.table().ensure()?;

        info!(data_dir = %config.data_dir.display(), "opened ride database");
        Ok(Self {
            config,
            drivers,
            locations,
            trips,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn drivers(&self) -> &DriverRegistry {
        &self.drivers
    }

    pub fn locations(&self) -> &LocationRegistry {
        &self.locations
    }

    pub fn trips(&self) -> &TripStore {
        &self.trips
    }

    pub fn add_trip(&self, trip: &NewTrip) -> Result<TripId> {
        self.trips.insert(trip)
    }

    pub fn add_trips(&self, entries: &[Value]) -> BatchInsert {
        self.trips.insert_batch(entries)
    }

    pub fn delete_trip(&self, trip_id: TripId) -> Result<()> {
        self.trips.delete(trip_id)
    }

    /// Trips matching `query`; empty when the table or the match set is empty.
    pub fn search_trips(&self, query: &TripQuery) -> Result<Vec<Trip>> {
        query.validate()?;
        let trips = self.trips.all()?;
        if trips.is_empty() {
            return Ok(trips);
        }
        query.apply(trips)
    }
}
