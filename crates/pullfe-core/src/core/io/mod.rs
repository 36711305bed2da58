//! Provides input/output functionality for the file formats used by both pipelines.
//!
//! Force logs are plain whitespace-delimited text written by the pulling runs.
//! The batched dataset is written as a NumPy `.npz` container, estimator results
//! are read from JSON records, and comparison output is rendered as SVG figures
//! and optional CSV tables.

pub mod dataset;
pub mod figure;
pub mod force_log;
pub mod results;
pub mod table;
