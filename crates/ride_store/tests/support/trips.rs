use ride_store::NewTrip;
use serde_json::{json, Value};

/// Builder for trip fields with sensible defaults.
#[derive(Clone, Debug)]
pub struct TripSpec {
    pub trip: NewTrip,
}

impl Default for TripSpec {
    fn default() -> Self {
        Self {
            trip: NewTrip {
                driver: "Reyes, Ana".to_string(),
                pickup_datetime: "08:00:00,01-01-2024".to_string(),
                dropoff_datetime: "08:30:00,01-01-2024".to_string(),
                passenger_count: 1,
                pickup_loc_name: "Pine View".to_string(),
                dropoff_loc_name: "Legazpi Village".to_string(),
                trip_distance: 1200.0,
                fare_amount: 95.0,
            },
        }
    }
}

impl TripSpec {
    pub fn driver(mut self, driver: &str) -> Self {
        self.trip.driver = driver.to_string();
        self
    }

    pub fn pickup(mut self, pickup: &str) -> Self {
        self.trip.pickup_datetime = pickup.to_string();
        self
    }

    pub fn dropoff(mut self, dropoff: &str) -> Self {
        self.trip.dropoff_datetime = dropoff.to_string();
        self
    }

    pub fn passengers(mut self, count: i64) -> Self {
        self.trip.passenger_count = count;
        self
    }

    pub fn route(mut self, from: &str, to: &str) -> Self {
        self.trip.pickup_loc_name = from.to_string();
        self.trip.dropoff_loc_name = to.to_string();
        self
    }

    pub fn distance(mut self, meters: f64) -> Self {
        self.trip.trip_distance = meters;
        self
    }

    pub fn fare(mut self, amount: f64) -> Self {
        self.trip.fare_amount = amount;
        self
    }

    pub fn build(self) -> NewTrip {
        self.trip
    }

    pub fn to_json(&self) -> Value {
        json!({
            "driver": self.trip.driver,
            "pickup_datetime": self.trip.pickup_datetime,
            "dropoff_datetime": self.trip.dropoff_datetime,
            "passenger_count": self.trip.passenger_count,
            "pickup_loc_name": self.trip.pickup_loc_name,
            "dropoff_loc_name": self.trip.dropoff_loc_name,
            "trip_distance": self.trip.trip_distance,
            "fare_amount": self.trip.fare_amount,
        })
    }
}

pub fn trip() -> TripSpec {
    TripSpec::default()
}
