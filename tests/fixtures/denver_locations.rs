//! Denver-area parks and landmarks for realistic test fixtures.
//!
//! Coordinates are approximate (street-level accuracy), which is plenty for
//! clustering and great-circle ordering.

use walk_planner::{Coordinate, Stop};

use super::at;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

// ============================================================================
// Downtown / LoDo
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("Union Station", 39.7527, -105.0002),
    Location::new("Coors Field", 39.7559, -104.9942),
    Location::new("Civic Center Park", 39.7392, -104.9874),
    Location::new("Denver Art Museum", 39.7372, -104.9893),
    Location::new("Ball Arena", 39.7487, -105.0077),
    Location::new("Confluence Park", 39.7545, -105.0077),
];

// ============================================================================
// East side parks
// ============================================================================

pub const EAST_PARKS: &[Location] = &[
    Location::new("City Park", 39.7473, -104.9500),
    Location::new("Denver Zoo", 39.7500, -104.9490),
    Location::new("Cheesman Park", 39.7331, -104.9660),
    Location::new("Congress Park", 39.7335, -104.9497),
    Location::new("Denver Botanic Gardens", 39.7320, -104.9597),
    Location::new("Central Park", 39.7605, -104.8889),
];

// ============================================================================
// West / Northwest
// ============================================================================

pub const WEST_SIDE: &[Location] = &[
    Location::new("Sloan's Lake", 39.7500, -105.0464),
    Location::new("Empower Field", 39.7439, -105.0201),
    Location::new("Highland Square", 39.7600, -105.0330),
    Location::new("Berkeley Park", 39.7790, -105.0450),
    Location::new("Rocky Mountain Lake Park", 39.7770, -105.0330),
];

// ============================================================================
// South
// ============================================================================

pub const SOUTH_SIDE: &[Location] = &[
    Location::new("Washington Park", 39.7004, -104.9717),
    Location::new("Observatory Park", 39.6784, -104.9420),
    Location::new("Platt Park", 39.6840, -104.9800),
    Location::new("Harvard Gulch Park", 39.6700, -104.9780),
];

/// Returns all fixture locations.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(24);
    all.extend_from_slice(DOWNTOWN);
    all.extend_from_slice(EAST_PARKS);
    all.extend_from_slice(WEST_SIDE);
    all.extend_from_slice(SOUTH_SIDE);
    all
}

/// Turns locations into stops with walk times spread over the morning.
pub fn stops_for(locations: &[Location]) -> Vec<Stop> {
    locations
        .iter()
        .enumerate()
        .map(|(i, loc)| {
            let slot = (i * 7) % 16;
            Stop::new(
                format!("walk_{i}"),
                loc.name,
                loc.coords(),
                at(8 + (slot / 4) as u32, (slot % 4) as u32 * 15),
            )
        })
        .collect()
}

#[test]
fn test_coordinates_in_denver_area() {
    for loc in all_locations() {
        assert!(loc.lat > 39.6 && loc.lat < 39.85, "{} lat out of range: {}", loc.name, loc.lat);
        assert!(loc.lon > -105.1 && loc.lon < -104.85, "{} lon out of range: {}", loc.name, loc.lon);
    }
}
