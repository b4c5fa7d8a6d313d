//! Day-of-week trip statistics.
//!
//! The basic measure is the day-of-week average: trips are counted per
//! calendar date of pickup, and those daily counts are averaged over every
//! date that falls on the same weekday. Slices by passenger count and by
//! driver apply the same measure to each partition.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use ride_store::{DriverId, RideDb, StoreError, Trip};
use tracing::debug;

use crate::error::AnalyticsError;

/// Monday first, as reports list them.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Average trips per date for each weekday.
///
/// All seven weekdays are always present; a weekday on which no trip was
/// picked up reads as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekdayAverages {
    averages: [Option<f64>; 7],
}

impl WeekdayAverages {
    pub fn get(&self, day: Weekday) -> Option<f64> {
        self.averages[day.num_days_from_monday() as usize]
    }

    /// Monday through Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<f64>)> + '_ {
        WEEKDAYS.iter().map(|day| (*day, self.get(*day)))
    }

    /// Monday through Sunday, keyed by English day name.
    pub fn named(&self) -> Vec<(&'static str, Option<f64>)> {
        self.iter()
            .map(|(day, average)| (weekday_name(day), average))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.iter().all(Option::is_none)
    }
}

pub fn per_day_of_week_average<'a, I>(trips: I) -> WeekdayAverages
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for trip in trips {
        *per_date.entry(trip.pickup_datetime.date()).or_default() += 1;
    }

    let mut totals = [0usize; 7];
    let mut dates = [0usize; 7];
    for (date, count) in per_date {
        let slot = date.weekday().num_days_from_monday() as usize;
        totals[slot] += count;
        dates[slot] += 1;
    }

    let mut averages = [None; 7];
    for slot in 0..7 {
        if dates[slot] > 0 {
            averages[slot] = Some(totals[slot] as f64 / dates[slot] as f64);
        }
    }
    WeekdayAverages { averages }
}

/// Day-of-week averages for each passenger count, ascending.
pub fn per_passenger_count_average(trips: &[Trip]) -> BTreeMap<u32, WeekdayAverages> {
    let mut partitions: BTreeMap<u32, Vec<&Trip>> = BTreeMap::new();
    for trip in trips {
        partitions.entry(trip.passenger_count).or_default().push(trip);
    }
    partitions
        .into_iter()
        .map(|(count, rows)| (count, per_day_of_week_average(rows)))
        .collect()
}

/// Day-of-week averages for each driver, keyed by "Last, Given".
///
/// Trips whose driver reference does not resolve are left out.
pub fn per_driver_average(
    trips: &[Trip],
    driver_names: &HashMap<DriverId, String>,
) -> BTreeMap<String, WeekdayAverages> {
    let mut partitions: BTreeMap<&str, Vec<&Trip>> = BTreeMap::new();
    let mut unresolved = 0usize;
    for trip in trips {
        match trip.driver_id.and_then(|id| driver_names.get(&id)) {
            Some(name) => partitions.entry(name.as_str()).or_default().push(trip),
            None => unresolved += 1,
        }
    }
    if unresolved > 0 {
        debug!(unresolved, "trips without a known driver left out of driver statistics");
    }

    partitions
        .into_iter()
        .map(|(name, rows)| (name.to_string(), per_day_of_week_average(rows)))
        .collect()
}

/// Which statistics slice to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Trip,
    Passenger,
    Driver,
    All,
}

impl FromStr for StatKind {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "trip" => Ok(StatKind::Trip),
            "passenger" => Ok(StatKind::Passenger),
            "driver" => Ok(StatKind::Driver),
            "all" => Ok(StatKind::All),
            other => Err(StoreError::InvalidQuery(format!(
                "unknown statistics kind '{other}'; expected trip, passenger, driver or all"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statistics {
    Trip(WeekdayAverages),
    Passenger(BTreeMap<u32, WeekdayAverages>),
    Driver(BTreeMap<String, WeekdayAverages>),
    All {
        trip: WeekdayAverages,
        passenger: BTreeMap<u32, WeekdayAverages>,
        driver: BTreeMap<String, WeekdayAverages>,
    },
}

/// Loads the trips table and computes the requested slice.
pub fn generate_statistics(db: &RideDb, kind: StatKind) -> Result<Statistics, AnalyticsError> {
    let trips = db.trips().all()?;
    let statistics = match kind {
        StatKind::Trip => Statistics::Trip(per_day_of_week_average(&trips)),
        StatKind::Passenger => Statistics::Passenger(per_passenger_count_average(&trips)),
        StatKind::Driver => {
            Statistics::Driver(per_driver_average(&trips, &db.drivers().display_names()?))
        }
        StatKind::All => Statistics::All {
            trip: per_day_of_week_average(&trips),
            passenger: per_passenger_count_average(&trips),
            driver: per_driver_average(&trips, &db.drivers().display_names()?),
        },
    };
    Ok(statistics)
}
