//! Error and warning types for planning runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::models::GroupId;

#[derive(Debug, ThisError)]
pub enum PlanError {
    #[error("{} invalid stop record(s): {}", .issues.len(), join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },
    #[error("no stops supplied")]
    EmptyInput,
    #[error("route count k={k} must be between 1 and the stop count ({stop_count})")]
    Configuration { k: usize, stop_count: usize },
    #[error("distance matrix unavailable: {0}")]
    DistanceMatrix(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    pub fn distance_matrix(message: impl Into<String>) -> Self {
        Self::DistanceMatrix(message.into())
    }

    /// Issues attached to a validation failure, empty for every other kind.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation { issues } => issues,
            _ => &[],
        }
    }
}

/// One offending input record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Position of the record in the caller's input.
    pub index: usize,
    pub label: String,
    pub problem: ValidationProblem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationProblem {
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    NonFiniteCoordinate,
    InvalidTime(String),
    DuplicateId(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}): ", self.index, self.label)?;
        match &self.problem {
            ValidationProblem::LatitudeOutOfRange(lat) => {
                write!(f, "latitude {lat} outside [-90, 90]")
            }
            ValidationProblem::LongitudeOutOfRange(lon) => {
                write!(f, "longitude {lon} outside [-180, 180]")
            }
            ValidationProblem::NonFiniteCoordinate => write!(f, "coordinate is not a finite number"),
            ValidationProblem::InvalidTime(raw) => write!(f, "desired time {raw:?} is not HH:MM"),
            ValidationProblem::DuplicateId(id) => write!(f, "id {id:?} already used"),
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Non-fatal conditions reported next to a successful plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanWarning {
    /// A requested group attracted no stops and was left out of the routes.
    EmptyGroup { group: GroupId },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroup { group } => write!(f, "group {group} received no stops"),
        }
    }
}
