//! cogrisk-core: dementia-risk scoring engine, input preparation, and reports.
//!
//! This crate defines the measurement model, the weighted scoring rules, and
//! the file formats that the cogrisk CLI builds on.

pub mod config;
pub mod error;
pub mod inputs;
pub mod model;
pub mod parser;
pub mod report;
pub mod scorer;
pub mod traits;
pub mod weights;
