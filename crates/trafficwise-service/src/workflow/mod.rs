//! Domain operations that go beyond a plain patch.

pub mod incident;
pub mod signal;

pub use incident::IncidentWorkflow;
pub use signal::SignalControl;
