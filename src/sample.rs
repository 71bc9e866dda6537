//! Built-in demo data: six pickups around downtown Denver.

use chrono::{NaiveTime, TimeDelta};

use crate::models::{Coordinate, Stop, StopRecord};

const SAMPLE: [(&str, f64, f64, u32, u32); 6] = [
    ("A", 39.7392, -104.9903, 9, 0),
    ("B", 39.7420, -104.9982, 10, 0),
    ("C", 39.7350, -104.9820, 9, 30),
    ("D", 39.7550, -104.9700, 11, 0),
    ("E", 39.7501, -105.0020, 10, 15),
    ("F", 39.7484, -104.9912, 9, 45),
];

/// The sample stops as raw records, times formatted `HH:MM`.
pub fn sample_records() -> Vec<StopRecord> {
    SAMPLE
        .iter()
        .map(|&(label, lat, lon, hour, minute)| {
            StopRecord::new(label, lat, lon, format!("{hour:02}:{minute:02}"))
        })
        .collect()
}

/// The sample stops, already validated.
pub fn sample_stops() -> Vec<Stop> {
    SAMPLE
        .iter()
        .map(|&(label, lat, lon, hour, minute)| {
            let desired_time =
                NaiveTime::default() + TimeDelta::minutes(i64::from(hour * 60 + minute));
            Stop::new(label, label, Coordinate::new(lat, lon), desired_time)
        })
        .collect()
}
