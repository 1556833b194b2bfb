//! User domain entities.

pub mod model;
pub mod status;

pub use model::{User, UserDraft, UserPatch};
pub use status::UserStatus;
