// src/map/door.rs

use crate::utils::Pose;
use serde::Serialize;

/// A connector marker sitting on the junction between two linked sockets.
/// It has no behaviour beyond its pose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    pub template: String,
    pub pose: Pose,
}

impl Door {
    pub fn new(template: impl Into<String>, pose: Pose) -> Self {
        Door {
            template: template.into(),
            pose,
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

/// Closes a socket that was never linked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillerWall {
    pub template: String,
    pub pose: Pose,
}

impl FillerWall {
    pub fn new(template: impl Into<String>, pose: Pose) -> Self {
        FillerWall {
            template: template.into(),
            pose,
        }
    }
}
