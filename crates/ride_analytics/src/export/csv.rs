use super::{ExportRow, EXPORT_COLUMNS};
use crate::error::AnalyticsError;

pub(crate) fn export_to_csv_impl(
    rows: &[ExportRow],
    file: std::fs::File,
) -> Result<(), AnalyticsError> {
    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    wtr.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
