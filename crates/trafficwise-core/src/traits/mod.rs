//! Core traits defined in `trafficwise-core` and implemented by the entity crate.

pub mod record;

pub use record::{Draft, Managed, Patch, Record};
