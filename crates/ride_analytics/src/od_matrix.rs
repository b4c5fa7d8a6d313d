//! Origin-destination matrix of average daily trip counts.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use ride_store::timestamp::parse_date;
use ride_store::{LocationId, RideDb, StoreError, Trip};

use crate::error::AnalyticsError;

/// Inclusive window on the pickup date. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parses `[start, end]` bounds given as text.
    ///
    /// Each bound is `dd-mm-yyyy` or a full `hh:mm:ss,dd-mm-yyyy` timestamp
    /// whose date part is used; `None` leaves that side open.
    pub fn parse(bounds: &[Option<&str>]) -> Result<Self, StoreError> {
        let [start, end] = bounds else {
            return Err(StoreError::InvalidQuery(format!(
                "date range must have exactly two bounds, got {}",
                bounds.len()
            )));
        };

        let parse_bound = |bound: &Option<&str>| -> Result<Option<NaiveDate>, StoreError> {
            bound
                .map(|text| {
                    parse_date(text).map_err(|_| {
                        StoreError::InvalidQuery(format!("invalid date range bound '{text}'"))
                    })
                })
                .transpose()
        };

        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Average trips per day for each (pickup, dropoff) location pair.
///
/// The averaging denominator for a pair is the number of distinct dates on
/// which that pair had at least one trip. Pairs of known axis names with no
/// trips read as 0.0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OdMatrix {
    pickups: Vec<String>,
    dropoffs: Vec<String>,
    cells: BTreeMap<(String, String), f64>,
}

impl OdMatrix {
    /// Pickup location names, sorted.
    pub fn pickups(&self) -> &[String] {
        &self.pickups
    }

    /// Dropoff location names, sorted.
    pub fn dropoffs(&self) -> &[String] {
        &self.dropoffs
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `None` when either name is not on the matrix axes.
    pub fn average(&self, pickup: &str, dropoff: &str) -> Option<f64> {
        let on_axes = self.pickups.iter().any(|name| name == pickup)
            && self.dropoffs.iter().any(|name| name == dropoff);
        on_axes.then(|| {
            self.cells
                .get(&(pickup.to_string(), dropoff.to_string()))
                .copied()
                .unwrap_or(0.0)
        })
    }

    /// One row per dropoff location, one value per pickup location, in axis
    /// order.
    pub fn rows(&self) -> Vec<(&str, Vec<f64>)> {
        self.dropoffs
            .iter()
            .map(|dropoff| {
                let values = self
                    .pickups
                    .iter()
                    .map(|pickup| self.average(pickup, dropoff).unwrap_or(0.0))
                    .collect();
                (dropoff.as_str(), values)
            })
            .collect()
    }
}

/// Builds the matrix from `trips`, naming locations through
/// `location_names`. Trips whose pickup or dropoff does not resolve are
/// left out.
pub fn od_matrix(
    trips: &[Trip],
    location_names: &HashMap<LocationId, String>,
    window: Option<&DateWindow>,
) -> OdMatrix {
    let name_of = |id: Option<LocationId>| id.and_then(|id| location_names.get(&id));

    let mut daily: BTreeMap<(&str, &str, NaiveDate), usize> = BTreeMap::new();
    for trip in trips {
        let date = trip.pickup_datetime.date();
        if !window.map_or(true, |window| window.contains(date)) {
            continue;
        }
        let (Some(pickup), Some(dropoff)) = (name_of(trip.pickup_loc_id), name_of(trip.dropoff_loc_id))
        else {
            continue;
        };
        *daily.entry((pickup.as_str(), dropoff.as_str(), date)).or_default() += 1;
    }

    let mut totals: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
    for ((pickup, dropoff, _date), count) in daily {
        let entry = totals.entry((pickup, dropoff)).or_default();
        entry.0 += count;
        entry.1 += 1;
    }

    let pickups: BTreeSet<&str> = totals.keys().map(|(pickup, _)| *pickup).collect();
    let dropoffs: BTreeSet<&str> = totals.keys().map(|(_, dropoff)| *dropoff).collect();
    let cells = totals
        .into_iter()
        .map(|((pickup, dropoff), (total, dates))| {
            (
                (pickup.to_string(), dropoff.to_string()),
                total as f64 / dates as f64,
            )
        })
        .collect();

    OdMatrix {
        pickups: pickups.into_iter().map(str::to_string).collect(),
        dropoffs: dropoffs.into_iter().map(str::to_string).collect(),
        cells,
    }
}

/// Loads trips and locations and builds the matrix.
pub fn generate_od_matrix(
    db: &RideDb,
    window: Option<&DateWindow>,
) -> Result<OdMatrix, AnalyticsError> {
    let trips = db.trips().all()?;
    let names = db.locations().names()?;
    Ok(od_matrix(&trips, &names, window))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn window_parses_one_and_two_sided_bounds() {
        let window = DateWindow::parse(&[Some("02-01-2024"), None]).expect("valid");
        assert_eq!(window, DateWindow::new(Some(date(2)), None));

        let window =
            DateWindow::parse(&[Some("00:00:00,02-01-2024"), Some("05-01-2024")]).expect("valid");
        assert!(window.contains(date(2)));
        assert!(window.contains(date(5)));
        assert!(!window.contains(date(6)));
        assert!(!window.contains(date(1)));
    }

    #[test]
    fn window_rejects_bad_shapes_and_bounds() {
        let too_long = DateWindow::parse(&[Some("01-01-2024"), None, None]);
        assert!(matches!(too_long, Err(StoreError::InvalidQuery(_))));

        let unparseable = DateWindow::parse(&[Some("2024-01-01"), None]);
        assert!(matches!(unparseable, Err(StoreError::InvalidQuery(_))));
    }
}
