//! # trafficwise-service
//!
//! Record management for the TrafficWise console. Stores are immutable
//! snapshots; lists are derived from them by a pure filter, sort, and
//! paginate pipeline; mutations go through a validating gateway that
//! returns a new snapshot plus an audit event.
//!
//! [`ConsoleSession`] owns every store of one session and is the usual
//! entry point.

pub mod context;
pub mod dashboard;
pub mod mutation;
pub mod query;
pub mod seed;
pub mod session;
pub mod store;
pub mod workflow;

pub use context::ActorContext;
pub use dashboard::DashboardSummary;
pub use mutation::{MutationGateway, MutationOutcome};
pub use query::{ListView, filter_records, paginate, sort_records};
pub use session::ConsoleSession;
pub use store::RecordStore;
pub use workflow::{IncidentWorkflow, SignalControl};
