//! # Core Module
//!
//! Fundamental building blocks shared by both pipelines.
//!
//! - **Data Models** ([`models`]) - Pulling records, work legs, free-energy and PMF
//!   curves, and the batched work/position dataset
//! - **Units** ([`units`]) - Boltzmann constant, thermodynamic beta, and the
//!   Å/nm and kcal/mol/k_BT conversions applied before output
//! - **File I/O** ([`io`]) - Readers and writers for every on-disk format

pub mod io;
pub mod models;
pub mod units;
