//! Stops, routes, and plan results.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PlanWarning;
use crate::polyline::Polyline;

/// Index of a k-means group, always in `[0, k)`.
pub type GroupId = usize;

/// WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn lat_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
    }

    pub fn lon_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon)
    }

    /// True when both components are finite and inside their WGS-84 ranges.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.lat_in_range() && self.lon_in_range()
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Raw stop as supplied by an upload, a sample generator, or a database row.
///
/// `desired_time` is kept as text so that a bad value can be reported against
/// the record that carried it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub desired_time: String,
}

impl StopRecord {
    pub fn new(label: impl Into<String>, lat: f64, lon: f64, desired_time: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            lat,
            lon,
            desired_time: desired_time.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A validated service visit. Read-only for the duration of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub label: String,
    pub location: Coordinate,
    /// Only used to choose where a route starts.
    pub desired_time: NaiveTime,
}

impl Stop {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        location: Coordinate,
        desired_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            location,
            desired_time,
        }
    }
}

/// A stop placed on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedStop {
    /// 0-based visit position within the route.
    pub position: usize,
    pub stop: Stop,
}

/// Visiting order for the stops of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub group: GroupId,
    pub stops: Vec<RoutedStop>,
    /// Sum of leg distances, in meters, under the metric used for ordering.
    pub total_distance_m: f64,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Option<&Stop> {
        self.stops.first().map(|routed| &routed.stop)
    }

    pub fn stop_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|routed| routed.stop.id.as_str()).collect()
    }

    /// Visiting path as (lat, lon) points, for drawing the route on a map.
    pub fn polyline(&self) -> Polyline {
        Polyline::new(
            self.stops
                .iter()
                .map(|routed| routed.stop.location.as_tuple())
                .collect(),
        )
    }
}

/// Output of one planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanResult {
    /// One route per non-empty group, ordered by group id.
    pub routes: Vec<Route>,
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl PlanResult {
    pub fn route_for(&self, group: GroupId) -> Option<&Route> {
        self.routes.iter().find(|route| route.group == group)
    }

    pub fn stop_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Flattened rows, ordered by group then position, for tabular export.
    pub fn rows(&self) -> Vec<RouteRow> {
        self.routes
            .iter()
            .flat_map(|route| {
                route.stops.iter().map(move |routed| RouteRow {
                    group: route.group,
                    position: routed.position,
                    id: routed.stop.id.clone(),
                    label: routed.stop.label.clone(),
                    lat: routed.stop.location.lat,
                    lon: routed.stop.location.lon,
                    desired_time: routed.stop.desired_time.format("%H:%M").to_string(),
                })
            })
            .collect()
    }
}

/// One line of an exported route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRow {
    pub group: GroupId,
    pub position: usize,
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub desired_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn routed(position: usize, id: &str, lat: f64, lon: f64, time: NaiveTime) -> RoutedStop {
        RoutedStop {
            position,
            stop: Stop::new(id, id, Coordinate::new(lat, lon), time),
        }
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_rows_follow_group_then_position() {
        let result = PlanResult {
            routes: vec![
                Route {
                    group: 0,
                    stops: vec![
                        routed(0, "a", 39.7392, -104.9903, at(9, 0)),
                        routed(1, "f", 39.7484, -104.9912, at(9, 45)),
                    ],
                    total_distance_m: 1_000.0,
                },
                Route {
                    group: 1,
                    stops: vec![routed(0, "d", 39.7550, -104.9700, at(11, 0))],
                    total_distance_m: 0.0,
                },
            ],
            warnings: Vec::new(),
        };

        let rows = result.rows();
        let keys: Vec<(usize, usize, &str)> = rows
            .iter()
            .map(|row| (row.group, row.position, row.id.as_str()))
            .collect();
        assert_eq!(keys, vec![(0, 0, "a"), (0, 1, "f"), (1, 0, "d")]);
        assert_eq!(rows[1].desired_time, "09:45");
        assert_eq!(result.stop_count(), 3);
        assert_eq!(result.route_for(1).map(Route::len), Some(1));
        assert!(result.route_for(2).is_none());
    }

    #[test]
    fn test_route_polyline_follows_visit_order() {
        let route = Route {
            group: 0,
            stops: vec![
                routed(0, "b", 39.7420, -104.9982, at(10, 0)),
                routed(1, "e", 39.7501, -105.0020, at(10, 15)),
            ],
            total_distance_m: 0.0,
        };

        assert_eq!(
            route.polyline().points(),
            &[(39.7420, -104.9982), (39.7501, -105.0020)]
        );
        assert_eq!(route.first().map(|stop| stop.id.as_str()), Some("b"));
        assert_eq!(route.stop_ids(), vec!["b", "e"]);
    }
}
