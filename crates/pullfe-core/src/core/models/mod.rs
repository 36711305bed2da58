//! Data models for pulling trajectories and free-energy estimates.

pub mod curve;
pub mod dataset;
pub mod trajectory;
