use tracing::warn;

use crate::error::StoreError;
use crate::records::TripId;

/// Outcome of a batch insertion.
#[derive(Debug, Default)]
pub struct BatchInsert {
    /// Identifiers of inserted trips, in the order they succeeded.
    pub trip_ids: Vec<TripId>,
    /// Entries that were skipped, in input order.
    pub skipped: Vec<BatchSkip>,
}

/// A batch entry that was not inserted.
#[derive(Debug)]
pub struct BatchSkip {
    /// Position of the entry in the input.
    pub index: usize,
    pub error: StoreError,
}

impl BatchSkip {
    /// True when the entry could not even be read into trip fields.
    pub fn is_incomplete(&self) -> bool {
        matches!(self.error, StoreError::MissingField(_))
    }
}

impl BatchInsert {
    pub(crate) fn record_skip(&mut self, index: usize, error: StoreError) {
        match &error {
            StoreError::MissingField(_) => {
                warn!(index, error = %error, "trip entry has invalid or incomplete information; skipping");
            }
            StoreError::DuplicateTrip(existing) => {
                warn!(index, existing_trip_id = existing.get(), "trip entry is already in the database; skipping");
            }
            _ => {
                warn!(index, error = %error, "trip entry was rejected; skipping");
            }
        }
        self.skipped.push(BatchSkip { index, error });
    }

    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|skip| skip.index).collect()
    }
}
