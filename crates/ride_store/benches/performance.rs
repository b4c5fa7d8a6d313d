//! Performance benchmarks for ride_store using Criterion.rs.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ride_store::{DriverId, LocationId, Match, RideDb, StoreConfig, Trip, TripId, TripQuery};

fn seeded_db(dir: &std::path::Path, trips: usize) -> RideDb {
    let db = RideDb::open(StoreConfig::new(dir)).expect("bench db should open");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(6, 0, 0))
        .expect("valid start");

    let rows: Vec<Trip> = (0..trips)
        .map(|i| {
            let pickup = start + Duration::minutes(i as i64 * 7);
            Trip {
                trip_id: TripId(i as u64 + 1),
                driver_id: Some(DriverId((i % 40) as u64 + 1)),
                pickup_datetime: pickup,
                dropoff_datetime: pickup + Duration::minutes(25),
                passenger_count: (i % 5) as u32,
                pickup_loc_id: Some(LocationId((i % 12) as u64 + 1)),
                dropoff_loc_id: Some(LocationId((i % 9) as u64 + 1)),
                trip_distance: 500.0 + (i % 300) as f64 * 10.0,
                fare_amount: 60.0 + (i % 200) as f64,
            }
        })
        .collect();
    db.trips()
        .table()
        .rewrite_all(&rows)
        .expect("bench trips should be written");
    db
}

fn bench_search(c: &mut Criterion) {
    let sizes = vec![("small", 1_000), ("medium", 10_000)];

    let mut group = c.benchmark_group("search_trips");
    for (name, trips) in sizes {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = seeded_db(dir.path(), trips);
        let query = TripQuery::new()
            .passenger_count(Match::between(1, 3))
            .fare_amount(Match::at_least(150.0));

        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| black_box(db.search_trips(query).expect("search should succeed")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
