//! # Engine Module
//!
//! Plumbing shared by the workflows.
//!
//! - **Configuration** ([`config`]) - Validated parameter sets for both pipelines,
//!   assembled through builders
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for
//!   front ends
//! - **Error Handling** ([`error`]) - The engine error type that every lower-level
//!   error converts into

pub mod config;
pub mod error;
pub mod progress;
