//! Fixed textual timestamp format shared by the tables, queries and exports.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, StoreError};

/// `hour:minute:second,day-month-year`, 24-hour clock, zero-padded.
pub const DATETIME_FORMAT: &str = "%H:%M:%S,%d-%m-%Y";

/// Date-only form accepted by date windows.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), DATETIME_FORMAT).map_err(|error| {
        StoreError::format(format!(
            "'{text}' does not match the timestamp format {DATETIME_FORMAT}: {error}"
        ))
    })
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parses either a bare `dd-mm-yyyy` date or a full timestamp, keeping only
/// its date part.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    parse_datetime(trimmed).map(|value| value.date())
}

/// Serde adapter storing `NaiveDateTime` columns in [`DATETIME_FORMAT`].
pub(crate) mod serde_datetime {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_datetime(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_datetime(&text).map_err(de::Error::custom)
    }
}
