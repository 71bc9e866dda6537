//! Input checks run before any clustering.
//!
//! Every offending record is collected so that the caller can fix an upload
//! in one pass instead of one error at a time.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::error::{PlanError, Result, ValidationIssue, ValidationProblem};
use crate::models::{Coordinate, Stop, StopRecord};

/// Wall-clock format accepted for `desired_time`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `HH:MM` time of day.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

/// Turn raw records into stops, rejecting the batch if any record is bad.
///
/// A record without an explicit id is identified by its label.
pub fn stops_from_records(records: &[StopRecord]) -> Result<Vec<Stop>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut stops = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id = record.id.clone().unwrap_or_else(|| record.label.clone());
        let location = Coordinate::new(record.lat, record.lon);
        let mut problems = coordinate_problems(location);

        let desired_time = parse_time(&record.desired_time);
        if desired_time.is_none() {
            problems.push(ValidationProblem::InvalidTime(record.desired_time.clone()));
        }
        if !seen.insert(id.clone()) {
            problems.push(ValidationProblem::DuplicateId(id.clone()));
        }

        match desired_time {
            Some(desired_time) if problems.is_empty() => {
                stops.push(Stop::new(id, record.label.clone(), location, desired_time));
            }
            _ => issues.extend(problems.into_iter().map(|problem| ValidationIssue {
                index,
                label: record.label.clone(),
                problem,
            })),
        }
    }

    if issues.is_empty() {
        Ok(stops)
    } else {
        Err(PlanError::Validation { issues })
    }
}

/// Check already-built stops: coordinates in range and ids unique.
pub fn validate_stops(stops: &[Stop]) -> Result<()> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, stop) in stops.iter().enumerate() {
        let mut problems = coordinate_problems(stop.location);
        if !seen.insert(stop.id.as_str()) {
            problems.push(ValidationProblem::DuplicateId(stop.id.clone()));
        }
        issues.extend(problems.into_iter().map(|problem| ValidationIssue {
            index,
            label: stop.label.clone(),
            problem,
        }));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(PlanError::Validation { issues })
    }
}

/// Fail fast on an empty run or a route count outside `[1, stop_count]`.
pub fn validate_route_count(k: usize, stop_count: usize) -> Result<()> {
    if stop_count == 0 {
        return Err(PlanError::EmptyInput);
    }
    if k == 0 || k > stop_count {
        return Err(PlanError::Configuration { k, stop_count });
    }
    Ok(())
}

fn coordinate_problems(location: Coordinate) -> Vec<ValidationProblem> {
    if location.is_valid() {
        return Vec::new();
    }
    if !location.is_finite() {
        return vec![ValidationProblem::NonFiniteCoordinate];
    }

    let mut problems = Vec::new();
    if !location.lat_in_range() {
        problems.push(ValidationProblem::LatitudeOutOfRange(location.lat));
    }
    if !location.lon_in_range() {
        problems.push(ValidationProblem::LongitudeOutOfRange(location.lon));
    }
    problems
}
