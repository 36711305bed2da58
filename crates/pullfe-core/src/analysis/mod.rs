//! # Analysis Module
//!
//! Pure numerical transforms used by the workflows. Nothing in this module touches
//! the filesystem; every function takes arrays and returns arrays or an
//! [`AnalysisError`] when its shape preconditions do not hold.
//!
//! - **Work accumulation** ([`work`]) - cumulative work, lambda schedules, and the
//!   stitching of forward and reverse pulling legs
//! - **PMF alignment** ([`alignment`]) - shifting estimator PMFs onto a reference
//! - **Statistics** ([`stats`]) - per-bin RMSE, bin centers, and equal-stride
//!   subsampling for plotting

use thiserror::Error;

pub mod alignment;
pub mod stats;
pub mod work;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Shape mismatch in {context}: expected length {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Grid of estimator '{estimator}' differs from the reference grid at index {index}")]
    GridMismatch { estimator: String, index: usize },
    #[error("Cannot subsample {requested} points from a curve of length {available}; the count must be smaller")]
    Subsample { requested: usize, available: usize },
    #[error("Empty input: {0}")]
    EmptyCurve(String),
}
