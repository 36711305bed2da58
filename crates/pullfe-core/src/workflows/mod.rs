//! End-to-end pipelines.
//!
//! [`collect`] turns per-trajectory force logs into the batched work dataset, and
//! [`compare`] aligns the PMF estimates of several estimators against a reference
//! and renders the comparison figures. Both report through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and return
//! [`EngineError`](crate::engine::error::EngineError) on failure.

pub mod collect;
pub mod compare;
