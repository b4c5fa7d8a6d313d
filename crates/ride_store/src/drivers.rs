//! Driver name to identifier registry.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::info;

use crate::error::{Result, StoreError};
use crate::records::{Driver, DriverId};
use crate::table::TableStore;

/// A parsed "Last, Given" driver name with both parts trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverName {
    pub last_name: String,
    pub given_name: String,
}

impl DriverName {
    pub fn parse(name: &str) -> Result<Self> {
        let mut parts = name.split(',');
        let (Some(last), Some(given), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(StoreError::format(format!(
                "driver name '{name}' must be formatted as 'Last, Given'"
            )));
        };

        let last_name = last.trim();
        let given_name = given.trim();
        if last_name.is_empty() || given_name.is_empty() {
            return Err(StoreError::format(format!(
                "driver name '{name}' has an empty last or given name"
            )));
        }

        Ok(Self {
            last_name: last_name.to_string(),
            given_name: given_name.to_string(),
        })
    }

    fn matches(&self, driver: &Driver) -> bool {
        driver.last_name.trim().to_lowercase() == self.last_name.to_lowercase()
            && driver.given_name.trim().to_lowercase() == self.given_name.to_lowercase()
    }
}

/// Owns driver identifier assignment. Drivers are never deleted.
#[derive(Debug, Clone)]
pub struct DriverRegistry {
    table: TableStore<Driver>,
}

impl DriverRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: TableStore::new(path),
        }
    }

    pub fn table(&self) -> &TableStore<Driver> {
        &self.table
    }

    pub fn all(&self) -> Result<Vec<Driver>> {
        self.table.load_all()
    }

    /// Identifier of the driver named `name`, if known.
    pub fn resolve(&self, name: &str) -> Result<Option<DriverId>> {
        let name = DriverName::parse(name)?;
        self.lookup(&name)
    }

    pub fn lookup(&self, name: &DriverName) -> Result<Option<DriverId>> {
        Ok(self
            .table
            .load_all()?
            .iter()
            .find(|driver| name.matches(driver))
            .map(|driver| driver.driver_id))
    }

    /// Identifier of the driver named `name`, registering the driver first if
    /// it has not been seen before.
    pub fn ensure(&self, name: &str) -> Result<DriverId> {
        let name = DriverName::parse(name)?;
        self.ensure_parsed(&name)
    }

    pub(crate) fn ensure_parsed(&self, name: &DriverName) -> Result<DriverId> {
        let drivers = self.table.load_all()?;
        if let Some(existing) = drivers.iter().find(|driver| name.matches(driver)) {
            return Ok(existing.driver_id);
        }

        let next = drivers
            .iter()
            .map(|driver| driver.driver_id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let driver = Driver {
            driver_id: DriverId(next),
            given_name: name.given_name.clone(),
            last_name: name.last_name.clone(),
        };
        self.table.append_row(&driver)?;

        info!(
            driver_id = next,
            driver = %driver.display_name(),
            "registered new driver"
        );
        Ok(driver.driver_id)
    }

    /// "Last, Given" for every known driver, keyed by identifier.
    pub fn display_names(&self) -> Result<HashMap<DriverId, String>> {
        Ok(self
            .table
            .load_all()?
            .into_iter()
            .map(|driver| (driver.driver_id, driver.display_name()))
            .collect())
    }
}
