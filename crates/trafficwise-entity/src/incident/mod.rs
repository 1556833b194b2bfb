//! Incident domain entities.

pub mod model;
pub mod severity;
pub mod status;

pub use model::{Incident, IncidentDraft, IncidentPatch};
pub use severity::Severity;
pub use status::IncidentStatus;
