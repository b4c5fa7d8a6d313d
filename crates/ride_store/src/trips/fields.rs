use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::drivers::DriverName;
use crate::error::{Result, StoreError};
use crate::timestamp::parse_datetime;

/// Caller-supplied fields of a trip to insert.
///
/// Driver and locations are given by display name; timestamps use the fixed
/// textual format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub driver: String,
    pub pickup_datetime: String,
    pub dropoff_datetime: String,
    pub passenger_count: i64,
    pub pickup_loc_name: String,
    pub dropoff_loc_name: String,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

/// `NewTrip` after validation, with parsed names and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidTrip {
    pub driver: DriverName,
    pub pickup_datetime: NaiveDateTime,
    pub dropoff_datetime: NaiveDateTime,
    pub passenger_count: u32,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

impl NewTrip {
    pub(crate) fn validate(&self) -> Result<ValidTrip> {
        let driver = DriverName::parse(&self.driver)?;
        let pickup_datetime = parse_datetime(&self.pickup_datetime)?;
        let dropoff_datetime = parse_datetime(&self.dropoff_datetime)?;

        let passenger_count = u32::try_from(self.passenger_count).map_err(|_| {
            StoreError::format(format!(
                "passenger_count must be a non-negative integer, got {}",
                self.passenger_count
            ))
        })?;

        Ok(ValidTrip {
            driver,
            pickup_datetime,
            dropoff_datetime,
            passenger_count,
            trip_distance: non_negative("trip_distance", self.trip_distance)?,
            fare_amount: non_negative("fare_amount", self.fare_amount)?,
        })
    }

    /// Extracts the required keys from a loosely typed entry.
    ///
    /// A missing key is [`StoreError::MissingField`]; a key holding the wrong
    /// kind of value is [`StoreError::Format`]. Distances and fares may be
    /// given as numeric strings.
    pub fn from_value(entry: &Value) -> Result<Self> {
        let Value::Object(fields) = entry else {
            return Err(StoreError::format("trip entry must be an object"));
        };

        Ok(Self {
            driver: string_field(fields, "driver")?,
            pickup_datetime: string_field(fields, "pickup_datetime")?,
            dropoff_datetime: string_field(fields, "dropoff_datetime")?,
            passenger_count: integer_field(fields, "passenger_count")?,
            pickup_loc_name: string_field(fields, "pickup_loc_name")?,
            dropoff_loc_name: string_field(fields, "dropoff_loc_name")?,
            trip_distance: number_field(fields, "trip_distance")?,
            fare_amount: number_field(fields, "fare_amount")?,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StoreError::format(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value> {
    fields.get(key).ok_or(StoreError::MissingField(key))
}

fn string_field(fields: &Map<String, Value>, key: &'static str) -> Result<String> {
    required(fields, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::format(format!("{key} must be a string")))
}

fn integer_field(fields: &Map<String, Value>, key: &'static str) -> Result<i64> {
    required(fields, key)?
        .as_i64()
        .ok_or_else(|| StoreError::format(format!("{key} must be an integer")))
}

fn number_field(fields: &Map<String, Value>, key: &'static str) -> Result<f64> {
    let value = required(fields, key)?;
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| StoreError::format(format!("{key} must be a number, got {value}")))
}
