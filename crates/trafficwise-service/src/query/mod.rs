//! The list pipeline: filter, then sort, then paginate.
//!
//! Every stage is a pure function over a snapshot and is written once
//! against [`trafficwise_core::traits::Record`].

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use filter::{filter_records, matches};
pub use paginate::paginate;
pub use sort::sort_records;
pub use view::ListView;
