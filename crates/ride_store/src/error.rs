use std::path::PathBuf;

use thiserror::Error;

use crate::records::TripId;

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed driver name, unparseable timestamp, wrong field type or an
    /// out-of-domain value.
    #[error("wrong input format: {0}")]
    Format(String),

    /// A loosely typed trip entry lacks a required key.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Inserting would duplicate the trip that already carries this id.
    #[error("trip already exists in the database as trip_id {0}")]
    DuplicateTrip(TripId),

    #[error("trip_id {0} cannot be found")]
    NotFound(TripId),

    /// Search or aggregation criteria are malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("failed to access table '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid store config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        StoreError::Format(message.into())
    }

    pub(crate) fn invalid_query(message: impl Into<String>) -> Self {
        StoreError::InvalidQuery(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.into(),
            source,
        }
    }
}
