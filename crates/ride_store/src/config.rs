//! Location of the tables on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

pub const DEFAULT_DRIVERS_FILE: &str = "drivers.csv";
pub const DEFAULT_LOCATIONS_FILE: &str = "locations.csv";
pub const DEFAULT_TRIPS_FILE: &str = "trips.csv";
pub const DEFAULT_SEQUENCES_FILE: &str = "sequences.csv";

/// Data directory and table file names.
///
/// Missing keys in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub drivers_file: String,
    pub locations_file: String,
    pub trips_file: String,
    pub sequences_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            drivers_file: DEFAULT_DRIVERS_FILE.to_string(),
            locations_file: DEFAULT_LOCATIONS_FILE.to_string(),
            trips_file: DEFAULT_TRIPS_FILE.to_string(),
            sequences_file: DEFAULT_SEQUENCES_FILE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Default file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_drivers_file(mut self, name: impl Into<String>) -> Self {
        self.drivers_file = name.into();
        self
    }

    pub fn with_locations_file(mut self, name: impl Into<String>) -> Self {
        self.locations_file = name.into();
        self
    }

    pub fn with_trips_file(mut self, name: impl Into<String>) -> Self {
        self.trips_file = name.into();
        self
    }

    pub fn with_sequences_file(mut self, name: impl Into<String>) -> Self {
        self.sequences_file = name.into();
        self
    }

    pub fn drivers_path(&self) -> PathBuf {
        self.data_dir.join(&self.drivers_file)
    }

    pub fn locations_path(&self) -> PathBuf {
        self.data_dir.join(&self.locations_file)
    }

    pub fn trips_path(&self) -> PathBuf {
        self.data_dir.join(&self.trips_file)
    }

    pub fn sequences_path(&self) -> PathBuf {
        self.data_dir.join(&self.sequences_file)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(contents)
            .map_err(|error| StoreError::Config(format!("invalid config json: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|error| {
            StoreError::Config(format!(
                "failed to read config file '{}': {error}",
                path.display()
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// File names must be non-empty, plain and distinct.
    pub fn validate(&self) -> Result<()> {
        let files = [
            ("drivers_file", &self.drivers_file),
            ("locations_file", &self.locations_file),
            ("trips_file", &self.trips_file),
            ("sequences_file", &self.sequences_file),
        ];

        for (key, name) in files {
            if name.trim().is_empty() {
                return Err(StoreError::Config(format!("{key} must not be empty")));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(StoreError::Config(format!(
                    "{key} '{name}' must be a file name, not a path"
                )));
            }
        }

        for (index, (key, name)) in files.iter().enumerate() {
            if let Some((other, _)) = files[index + 1..].iter().find(|(_, other)| other == name) {
                return Err(StoreError::Config(format!(
                    "{key} and {other} both point at '{name}'"
                )));
            }
        }

        Ok(())
    }
}
