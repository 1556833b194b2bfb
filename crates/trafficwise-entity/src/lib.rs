//! # trafficwise-entity
//!
//! Domain entity models for the TrafficWise console. Every struct in
//! this crate is a record held in an in-memory record store or a value
//! object belonging to one. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`, and expose their fields by name
//! through [`trafficwise_core::traits::Record`].

pub mod audit;
pub mod camera;
pub mod incident;
pub mod role;
pub mod signal;
pub mod user;

mod validation;
