//! Export window planning

pub mod planner;

pub use planner::{DateWindowPlanner, PlannedWindow};
