//! Core type definitions used across the TrafficWise workspace.

pub mod filter;
pub mod id;
pub mod pagination;
pub mod sorting;
pub mod value;

pub use filter::{DateRange, FilterSpec};
pub use id::{AuditLogId, CameraId, IdSequence, RecordId};
pub use pagination::{Page, PageRequest};
pub use sorting::{SortDirection, SortField};
pub use value::{FieldValue, parse_timestamp};
