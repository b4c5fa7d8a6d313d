use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use super::ExportRow;
use crate::error::AnalyticsError;

pub(crate) fn export_to_parquet_impl(
    rows: &[ExportRow],
    file: std::fs::File,
) -> Result<(), AnalyticsError> {
    let batch = build_record_batch(rows)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(rows: &[ExportRow]) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    let arrays = build_arrays(rows);

    RecordBatch::try_new(schema, arrays)
}

fn parquet_schema() -> Schema {
    Schema::new(vec![
        Field::new("driver_lastname", DataType::Utf8, true),
        Field::new("driver_givenname", DataType::Utf8, true),
        Field::new("pickup_datetime", DataType::Utf8, false),
        Field::new("dropoff_datetime", DataType::Utf8, false),
        Field::new("passenger_count", DataType::UInt32, false),
        Field::new("pickup_loc_name", DataType::Utf8, true),
        Field::new("dropoff_loc_name", DataType::Utf8, true),
        Field::new("trip_distance", DataType::Float64, false),
        Field::new("fare_amount", DataType::Float64, false),
    ])
}

fn optional_strings(rows: &[ExportRow], value: impl Fn(&ExportRow) -> Option<&str>) -> ArrayRef {
    Arc::new(rows.iter().map(value).collect::<StringArray>())
}

fn strings(rows: &[ExportRow], value: impl Fn(&ExportRow) -> &str) -> ArrayRef {
    Arc::new(rows.iter().map(|row| Some(value(row))).collect::<StringArray>())
}

fn build_arrays(rows: &[ExportRow]) -> Vec<ArrayRef> {
    vec![
        optional_strings(rows, |row| row.driver_lastname.as_deref()),
        optional_strings(rows, |row| row.driver_givenname.as_deref()),
        strings(rows, |row| row.pickup_datetime.as_str()),
        strings(rows, |row| row.dropoff_datetime.as_str()),
        Arc::new(UInt32Array::from(
            rows.iter().map(|row| row.passenger_count).collect::<Vec<_>>(),
        )),
        optional_strings(rows, |row| row.pickup_loc_name.as_deref()),
        optional_strings(rows, |row| row.dropoff_loc_name.as_deref()),
        Arc::new(Float64Array::from(
            rows.iter().map(|row| row.trip_distance).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|row| row.fare_amount).collect::<Vec<_>>(),
        )),
    ]
}
