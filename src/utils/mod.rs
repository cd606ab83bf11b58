// src/utils/mod.rs
pub mod geometry;
pub mod sampling;
pub mod util;

pub use geometry::{yaw_of, Bounds, Pose, EPSILON};
pub use sampling::{sample_bounded, MAX_ANCHOR_SAMPLES, MAX_ENTRY_SAMPLES, MAX_PLACEMENT_RETRIES};
