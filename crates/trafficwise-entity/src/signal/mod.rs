//! Intersection signal control entities.

pub mod model;

pub use model::{Intersection, PriorityKind, SignalMode, NORMAL_CYCLE};
