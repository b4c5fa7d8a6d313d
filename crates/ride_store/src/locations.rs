//! Read-only location name lookup.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::records::{Location, LocationId};
use crate::table::TableStore;

/// Resolves location names against reference data maintained elsewhere.
/// This registry never creates identifiers.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    table: TableStore<Location>,
}

impl LocationRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: TableStore::new(path),
        }
    }

    pub fn table(&self) -> &TableStore<Location> {
        &self.table
    }

    pub fn all(&self) -> Result<Vec<Location>> {
        self.table.load_all()
    }

    /// Case-insensitive, trimmed exact match. Unknown names are `None`.
    pub fn resolve(&self, name: &str) -> Result<Option<LocationId>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .table
            .load_all()?
            .iter()
            .find(|location| location.loc_name.trim().to_lowercase() == wanted)
            .map(|location| location.location_id))
    }

    pub fn names(&self) -> Result<HashMap<LocationId, String>> {
        Ok(self
            .table
            .load_all()?
            .into_iter()
            .map(|location| (location.location_id, location.loc_name))
            .collect())
    }
}
