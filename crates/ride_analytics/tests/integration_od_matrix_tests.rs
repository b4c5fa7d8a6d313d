mod support;

use ride_analytics::{generate_od_matrix, DateWindow};
use support::{add_trip, open_seeded_db};

const ANA: &str = "Reyes, Ana";
const PINE: &str = "Pine View";
const LEGAZPI: &str = "Legazpi Village";
const SALCEDO: &str = "Salcedo Village";

#[test]
fn pair_average_uses_dates_the_pair_occurred_on() {
    let (_dir, db) = open_seeded_db();
    add_trip(&db, ANA, "08:00:00,01-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "17:00:00,01-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "08:00:00,02-01-2024", 1, PINE, LEGAZPI);

    let matrix = generate_od_matrix(&db, None).expect("matrix");

    assert_eq!(matrix.average(PINE, LEGAZPI), Some(1.5));
}

#[test]
fn missing_pairs_read_as_zero_and_unknown_names_as_none() {
    let (_dir, db) = open_seeded_db();
    add_trip(&db, ANA, "08:00:00,01-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "09:00:00,01-01-2024", 1, SALCEDO, PINE);

    let matrix = generate_od_matrix(&db, None).expect("matrix");

    assert_eq!(matrix.pickups(), [PINE.to_string(), SALCEDO.to_string()]);
    assert_eq!(matrix.dropoffs(), [LEGAZPI.to_string(), PINE.to_string()]);
    assert_eq!(matrix.average(SALCEDO, LEGAZPI), Some(0.0));
    assert_eq!(matrix.average(LEGAZPI, PINE), None);

    let rows = matrix.rows();
    assert_eq!(rows[0], (LEGAZPI, vec![1.0, 0.0]));
    assert_eq!(rows[1], (PINE, vec![0.0, 1.0]));
}

#[test]
fn date_window_is_inclusive_on_pickup_date() {
    let (_dir, db) = open_seeded_db();
    add_trip(&db, ANA, "23:59:00,31-12-2023", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "00:01:00,01-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "23:00:00,03-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "09:00:00,03-01-2024", 1, PINE, LEGAZPI);
    add_trip(&db, ANA, "08:00:00,04-01-2024", 1, PINE, LEGAZPI);

    let both = DateWindow::parse(&[Some("01-01-2024"), Some("03-01-2024")]).expect("window");
    let from = DateWindow::parse(&[Some("03-01-2024"), None]).expect("window");
    let until = DateWindow::parse(&[None, Some("31-12-2023")]).expect("window");

    // 1 trip on 01-01, 2 trips on 03-01.
    let matrix = generate_od_matrix(&db, Some(&both)).expect("matrix");
    assert_eq!(matrix.average(PINE, LEGAZPI), Some(1.5));

    let matrix = generate_od_matrix(&db, Some(&from)).expect("matrix");
    assert_eq!(matrix.average(PINE, LEGAZPI), Some(1.5));

    let matrix = generate_od_matrix(&db, Some(&until)).expect("matrix");
    assert_eq!(matrix.average(PINE, LEGAZPI), Some(1.0));
}

#[test]
fn trips_with_unknown_locations_are_left_out() {
    let (_dir, db) = open_seeded_db();
    add_trip(&db, ANA, "08:00:00,01-01-2024", 1, PINE, "Atlantis");

    let matrix = generate_od_matrix(&db, None).expect("matrix");

    assert!(matrix.is_empty());
    assert!(matrix.pickups().is_empty());
}

#[test]
fn window_excluding_everything_gives_an_empty_matrix() {
    let (_dir, db) = open_seeded_db();
    add_trip(&db, ANA, "08:00:00,01-01-2024", 1, PINE, LEGAZPI);

    let window = DateWindow::parse(&[Some("01-02-2024"), None]).expect("window");
    let matrix = generate_od_matrix(&db, Some(&window)).expect("matrix");

    assert!(matrix.is_empty());
    assert_eq!(matrix.average(PINE, LEGAZPI), None);
}
