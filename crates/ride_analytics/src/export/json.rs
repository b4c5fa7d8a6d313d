use super::ExportRow;
use crate::error::AnalyticsError;

pub(crate) fn export_to_json_impl(
    rows: &[ExportRow],
    file: std::fs::File,
) -> Result<(), AnalyticsError> {
    serde_json::to_writer_pretty(file, rows)?;
    Ok(())
}
