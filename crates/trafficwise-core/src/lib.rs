//! # trafficwise-core
//!
//! Core crate for the TrafficWise console. Contains the record traits,
//! configuration schemas, typed identifiers, record-change events,
//! filter/sorting/pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TrafficWise crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
