pub mod core;
pub mod perception;

pub use crate::core::{GridError, GridPoint, GridRegion, Result};
pub use crate::perception::{detect_objects, DetectConfig, DetectedObject, Grid};
