//! Validated create, update, and delete against record stores.

pub mod gateway;

pub use gateway::{MutationGateway, MutationOutcome};
