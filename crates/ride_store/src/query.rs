//! Exact-match and inclusive-range search over the trips table.
//!
//! A [`TripQuery`] is an ordered list of [`Criterion`] values, each naming one
//! trip field and either an exact value or a range. Criteria are applied as a
//! conjunction in order. The result is sorted ascending, stably, by the
//! field of the last criterion that is not an exact timestamp; exact
//! timestamp criteria filter without choosing the sort key. If every
//! criterion is an exact timestamp the rows keep storage order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::records::{DriverId, Trip};
use crate::timestamp::parse_datetime;

/// Exact value or inclusive range. A range has at least one bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Match<T> {
    Exact(T),
    Range { lo: Option<T>, hi: Option<T> },
}

impl<T: PartialOrd> Match<T> {
    pub fn exact(value: T) -> Self {
        Match::Exact(value)
    }

    /// `lo <= field <= hi`.
    pub fn between(lo: T, hi: T) -> Self {
        Match::Range {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    /// `field >= lo`.
    pub fn at_least(lo: T) -> Self {
        Match::Range { lo: Some(lo), hi: None }
    }

    /// `field <= hi`.
    pub fn at_most(hi: T) -> Self {
        Match::Range { lo: None, hi: Some(hi) }
    }

    pub fn matches(&self, value: &T) -> bool {
        match self {
            Match::Exact(expected) => value == expected,
            Match::Range { lo, hi } => {
                lo.as_ref().map_or(true, |lo| value >= lo)
                    && hi.as_ref().map_or(true, |hi| value <= hi)
            }
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Match::Exact(_))
    }

    fn check(&self, field: TripField) -> Result<()> {
        match self {
            Match::Range { lo: None, hi: None } => Err(StoreError::invalid_query(format!(
                "range for '{field}' needs at least one bound"
            ))),
            _ => Ok(()),
        }
    }
}

/// Searchable trip fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    DriverId,
    PassengerCount,
    PickupDatetime,
    DropoffDatetime,
    TripDistance,
    FareAmount,
}

impl TripField {
    pub const ALL: [TripField; 6] = [
        TripField::DriverId,
        TripField::PassengerCount,
        TripField::PickupDatetime,
        TripField::DropoffDatetime,
        TripField::TripDistance,
        TripField::FareAmount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TripField::DriverId => "driver_id",
            TripField::PassengerCount => "passenger_count",
            TripField::PickupDatetime => "pickup_datetime",
            TripField::DropoffDatetime => "dropoff_datetime",
            TripField::TripDistance => "trip_distance",
            TripField::FareAmount => "fare_amount",
        }
    }

    fn compare(self, left: &Trip, right: &Trip) -> Ordering {
        match self {
            TripField::DriverId => left.driver_id.cmp(&right.driver_id),
            TripField::PassengerCount => left.passenger_count.cmp(&right.passenger_count),
            TripField::PickupDatetime => left.pickup_datetime.cmp(&right.pickup_datetime),
            TripField::DropoffDatetime => left.dropoff_datetime.cmp(&right.dropoff_datetime),
            TripField::TripDistance => left.trip_distance.total_cmp(&right.trip_distance),
            TripField::FareAmount => left.fare_amount.total_cmp(&right.fare_amount),
        }
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TripField {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self> {
        TripField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| StoreError::invalid_query(format!("unknown search field '{name}'")))
    }
}

/// One filter over a trip field.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    DriverId(Match<DriverId>),
    PassengerCount(Match<u32>),
    PickupDatetime(Match<NaiveDateTime>),
    DropoffDatetime(Match<NaiveDateTime>),
    TripDistance(Match<f64>),
    FareAmount(Match<f64>),
}

impl Criterion {
    pub fn field(&self) -> TripField {
        match self {
            Criterion::DriverId(_) => TripField::DriverId,
            Criterion::PassengerCount(_) => TripField::PassengerCount,
            Criterion::PickupDatetime(_) => TripField::PickupDatetime,
            Criterion::DropoffDatetime(_) => TripField::DropoffDatetime,
            Criterion::TripDistance(_) => TripField::TripDistance,
            Criterion::FareAmount(_) => TripField::FareAmount,
        }
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            // Trips without a driver reference never match a driver filter.
            Criterion::DriverId(m) => trip.driver_id.is_some_and(|id| m.matches(&id)),
            Criterion::PassengerCount(m) => m.matches(&trip.passenger_count),
            Criterion::PickupDatetime(m) => m.matches(&trip.pickup_datetime),
            Criterion::DropoffDatetime(m) => m.matches(&trip.dropoff_datetime),
            Criterion::TripDistance(m) => m.matches(&trip.trip_distance),
            Criterion::FareAmount(m) => m.matches(&trip.fare_amount),
        }
    }

    /// Whether applying this criterion makes its field the sort key.
    pub fn sets_sort_key(&self) -> bool {
        match self {
            Criterion::PickupDatetime(m) | Criterion::DropoffDatetime(m) => !m.is_exact(),
            _ => true,
        }
    }

    fn check(&self) -> Result<()> {
        let field = self.field();
        match self {
            Criterion::DriverId(m) => m.check(field),
            Criterion::PassengerCount(m) => m.check(field),
            Criterion::PickupDatetime(m) | Criterion::DropoffDatetime(m) => m.check(field),
            Criterion::TripDistance(m) | Criterion::FareAmount(m) => m.check(field),
        }
    }

    /// Builds a criterion from a field name and a loosely typed value.
    ///
    /// A JSON array is a `[lo, hi]` range where `null` leaves that side open;
    /// any other value is an exact match.
    pub fn from_value(field: &str, value: &Value) -> Result<Self> {
        let field: TripField = field.parse()?;
        let criterion = match field {
            TripField::DriverId => Criterion::DriverId(parse_match(field, value, |v| {
                v.as_u64().map(DriverId)
            })?),
            TripField::PassengerCount => Criterion::PassengerCount(parse_match(field, value, |v| {
                v.as_u64().and_then(|count| u32::try_from(count).ok())
            })?),
            TripField::PickupDatetime => {
                Criterion::PickupDatetime(parse_match(field, value, datetime_value)?)
            }
            TripField::DropoffDatetime => {
                Criterion::DropoffDatetime(parse_match(field, value, datetime_value)?)
            }
            TripField::TripDistance => {
                Criterion::TripDistance(parse_match(field, value, Value::as_f64)?)
            }
            TripField::FareAmount => {
                Criterion::FareAmount(parse_match(field, value, Value::as_f64)?)
            }
        };
        criterion.check()?;
        Ok(criterion)
    }
}

fn datetime_value(value: &Value) -> Option<NaiveDateTime> {
    value.as_str().and_then(|text| parse_datetime(text).ok())
}

fn parse_match<T, F>(field: TripField, value: &Value, scalar: F) -> Result<Match<T>>
where
    F: Fn(&Value) -> Option<T>,
{
    let bound = |value: &Value| -> Result<Option<T>> {
        if value.is_null() {
            return Ok(None);
        }
        scalar(value).map(Some).ok_or_else(|| {
            StoreError::invalid_query(format!("invalid value {value} for '{field}'"))
        })
    };

    match value {
        Value::Array(items) if items.len() > 2 => Err(StoreError::invalid_query(format!(
            "range for '{field}' has {} elements; expected 2",
            items.len()
        ))),
        Value::Array(items) if items.len() < 2 => Err(StoreError::invalid_query(format!(
            "range for '{field}' must have a lower and an upper bound"
        ))),
        Value::Array(items) => Ok(Match::Range {
            lo: bound(&items[0])?,
            hi: bound(&items[1])?,
        }),
        _ => bound(value)?.map(Match::Exact).ok_or_else(|| {
            StoreError::invalid_query(format!("exact value for '{field}' must not be null"))
        }),
    }
}

/// Ordered conjunction of criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripQuery {
    criteria: Vec<Criterion>,
}

impl TripQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `(field name, value)` pairs in order; see [`Criterion::from_value`].
    pub fn from_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let criteria = fields
            .into_iter()
            .map(|(field, value)| Criterion::from_value(field, &value))
            .collect::<Result<Vec<_>>>()?;
        let query = Self { criteria };
        query.validate()?;
        Ok(query)
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn driver_id(self, m: Match<DriverId>) -> Self {
        self.with(Criterion::DriverId(m))
    }

    pub fn passenger_count(self, m: Match<u32>) -> Self {
        self.with(Criterion::PassengerCount(m))
    }

    pub fn pickup_datetime(self, m: Match<NaiveDateTime>) -> Self {
        self.with(Criterion::PickupDatetime(m))
    }

    pub fn dropoff_datetime(self, m: Match<NaiveDateTime>) -> Self {
        self.with(Criterion::DropoffDatetime(m))
    }

    pub fn trip_distance(self, m: Match<f64>) -> Self {
        self.with(Criterion::TripDistance(m))
    }

    pub fn fare_amount(self, m: Match<f64>) -> Self {
        self.with(Criterion::FareAmount(m))
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn validate(&self) -> Result<()> {
        if self.criteria.is_empty() {
            return Err(StoreError::invalid_query("no search criteria provided"));
        }
        self.criteria.iter().try_for_each(Criterion::check)
    }

    /// Field the result is ordered by, if any criterion sets one.
    pub fn sort_field(&self) -> Option<TripField> {
        self.criteria
            .iter()
            .rev()
            .find(|criterion| criterion.sets_sort_key())
            .map(Criterion::field)
    }

    /// Filters and orders `trips` according to this query.
    pub fn apply(&self, mut trips: Vec<Trip>) -> Result<Vec<Trip>> {
        self.validate()?;
        for criterion in &self.criteria {
            trips.retain(|trip| criterion.matches(trip));
        }
        if let Some(field) = self.sort_field() {
            trips.sort_by(|left, right| field.compare(left, right));
        }
        Ok(trips)
    }
}
