use std::fs::File;
use std::path::Path;

use crate::error::AnalyticsError;

pub(crate) fn ensure_not_empty<T>(items: &[T]) -> Result<(), AnalyticsError> {
    if items.is_empty() {
        return Err(AnalyticsError::EmptyExport);
    }

    Ok(())
}

pub(crate) fn create_output_file(path: impl AsRef<Path>) -> Result<File, AnalyticsError> {
    Ok(File::create(path)?)
}
