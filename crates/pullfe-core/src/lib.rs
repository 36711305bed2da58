//! # pullfe Core Library
//!
//! Post-processing for free-energy calculations from steered (pulling) molecular
//! dynamics: accumulation of non-equilibrium work along forward and reverse pulling
//! legs, and comparison of potential-of-mean-force (PMF) estimates against a
//! reference estimator.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (pulling records, curves,
//!   the batched dataset), physical constants and unit conversions, and file I/O
//!   (force logs, `.npz` dataset container, estimator records, figures, tables).
//!
//! - **[`analysis`]: The Numerics.** Pure transforms over arrays: cumulative work,
//!   lambda schedules, stitching of pulling legs, PMF alignment, per-bin RMSE and
//!   equal-stride subsampling.
//!
//! - **[`engine`]: Configuration and Plumbing.** Validated configuration builders,
//!   the engine error type, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** The two end-to-end pipelines,
//!   [`workflows::collect`] and [`workflows::compare`].

pub mod analysis;
pub mod core;
pub mod engine;
pub mod workflows;
