//! Camera location entities.

pub mod model;
pub mod status;

pub use model::{CameraDraft, CameraLocation, CameraPatch};
pub use status::CameraStatus;
