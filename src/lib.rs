//! walk-planner
//!
//! Splits a day's dog-walk pickups among walkers and orders each walker's
//! stops into a route.

pub mod cache;
pub mod error;
pub mod geodesic;
pub mod haversine;
pub mod models;
pub mod osrm;
pub mod partition;
pub mod polyline;
pub mod sample;
pub mod sequence;
pub mod solver;
pub mod traits;
pub mod validation;

pub use error::{PlanError, PlanWarning, Result};
pub use models::{Coordinate, GroupId, PlanResult, Route, RoutedStop, Stop, StopRecord};
pub use solver::{plan, plan_records, plan_with, PlanOptions};
